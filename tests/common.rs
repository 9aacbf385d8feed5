// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Scripted stub LLM provider, measurement fixtures and in-memory resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `teen_fitness_coach`

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use teen_fitness_coach::config::{CoachConfig, LlmConfig, LogLevel};
use teen_fitness_coach::errors::{AppError, ErrorCode};
use teen_fitness_coach::gateway::AiGateway;
use teen_fitness_coach::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use teen_fitness_coach::models::{BodyMeasurements, MeasurementRecord};
use teen_fitness_coach::resources::CoachResources;
use teen_fitness_coach::storage::{InMemorySlot, KeyValueSlot};
use tokio::sync::Notify;

/// One scripted provider reply
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return this text as the completion
    Text(String),
    /// Fail with this error code and message
    Fail(ErrorCode, String),
}

/// Deterministic LLM provider that replays scripted replies and counts calls
///
/// When the script runs out the last reply is repeated.
pub struct StubProvider {
    replies: Mutex<VecDeque<Reply>>,
    last_reply: Mutex<Option<Reply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
    gate: Option<Arc<Notify>>,
}

impl StubProvider {
    /// Provider answering every call with `text`
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Self::scripted(vec![Reply::Text(text.into())])
    }

    /// Provider failing every call
    pub fn failing(code: ErrorCode, message: &str) -> Arc<Self> {
        Self::scripted(vec![Reply::Fail(code, message.to_owned())])
    }

    /// Provider replaying `replies` in order
    pub fn scripted(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last_reply: Mutex::new(None),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Provider that holds every call until `gate` is notified
    pub fn gated(text: impl Into<String>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Reply::Text(text.into())])),
            last_reply: Mutex::new(None),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    /// Number of completed or pending calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        let mut last = self.last_reply.lock().unwrap();
        if let Some(reply) = replies.pop_front() {
            *last = Some(reply.clone());
            reply
        } else {
            last.clone().expect("stub provider has no scripted reply")
        }
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn display_name(&self) -> &'static str {
        "Stub Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::structured_output()
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.next_reply() {
            Reply::Text(content) => Ok(ChatResponse {
                content,
                model: "stub-model".to_owned(),
                usage: None,
                finish_reason: Some("STOP".to_owned()),
            }),
            Reply::Fail(code, message) => Err(AppError::new(code, message)),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Six-field measurements
pub fn measurements(
    height: f64,
    weight: f64,
    arm: f64,
    shoulder: f64,
    waist: f64,
    thigh: f64,
) -> BodyMeasurements {
    BodyMeasurements {
        height_cm: height,
        weight_kg: weight,
        arm_cm: arm,
        shoulder_cm: shoulder,
        waist_cm: waist,
        thigh_cm: thigh,
    }
}

/// Typical ninth-grader measurements
pub fn typical_measurements() -> BodyMeasurements {
    measurements(168.0, 58.0, 29.0, 105.0, 72.0, 50.0)
}

/// Record dated `date` with typical values and the given arm size
pub fn record_with_arm(date: &str, arm: f64) -> MeasurementRecord {
    let mut values = typical_measurements();
    values.arm_cm = arm;
    MeasurementRecord::new(date, values)
}

/// A valid workout plan reply
pub fn workout_plan_json() -> String {
    json!({
        "title": "어깨 폭발 푸시 데이",
        "workoutPlan": [
            {"name": "푸시업", "part": "가슴", "sets": 4, "reps": "12-15", "rest": 60, "description": "가슴을 바닥 가까이"},
            {"name": "덤벨 숄더 프레스", "part": "어깨", "sets": 3, "reps": "10", "rest": 90, "description": "코어에 힘 주기"}
        ],
        "motivationalMessage": "오늘도 한 세트 더!"
    })
    .to_string()
}

/// A valid diet plan reply
pub fn diet_plan_json() -> String {
    json!({ "dietPlan": "## 아침\n- 현미밥과 계란 2개" }).to_string()
}

/// A valid body analysis reply
pub fn body_analysis_json() -> String {
    json!({
        "title": "균형 잡힌 성장 중!",
        "analysis": "어깨 대비 팔이 조금 가늘어요.",
        "recommendation": "덤벨 컬과 킥백을 추가해보세요.",
        "heightGrowthTip": "밤 11시 전에 잠들고 우유를 챙겨 드세요."
    })
    .to_string()
}

/// A valid daily goal reply
pub fn daily_goal_json() -> String {
    json!({
        "mainFocus": "팔 집중 데이",
        "habitSuggestion": "자기 전 5분 플랭크",
        "motivationalMessage": "어깨가 벌써 1cm 늘었어! 이제 팔 차례야!"
    })
    .to_string()
}

/// Configuration for tests that never touches the environment
pub fn test_config() -> CoachConfig {
    CoachConfig {
        http_port: 0,
        log_level: LogLevel::Info,
        data_dir: PathBuf::from("unused"),
        trend_window: 5,
        max_sessions: 100,
        cors_allowed_origins: "*".to_owned(),
        llm: LlmConfig::default(),
    }
}

/// In-memory resources backed by `provider`
pub fn test_resources(provider: Arc<StubProvider>) -> (Arc<CoachResources>, InMemorySlot) {
    resources_with(test_config(), provider)
}

/// In-memory resources with an explicit config and any provider
pub fn resources_with(
    config: CoachConfig,
    provider: Arc<dyn LlmProvider>,
) -> (Arc<CoachResources>, InMemorySlot) {
    let slot = InMemorySlot::new();
    let shared: Arc<dyn KeyValueSlot> = Arc::new(slot.clone());
    let resources = CoachResources::new(config, shared, AiGateway::new(provider));
    (Arc::new(resources), slot)
}
