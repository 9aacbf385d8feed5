// ABOUTME: AI gateway adapter between composed flow requests and the LLM provider
// ABOUTME: Renders the flow prompt, calls the provider once and parses a schema-checked result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! AI Gateway Adapter
//!
//! One [`Flow`] implementation per coaching flow binds its request type,
//! result type and prompt. [`AiGateway::invoke`] makes exactly one provider
//! call, never retries and never persists anything. The reply must be a
//! single JSON object (a surrounding Markdown code fence is tolerated); it
//! is deserialized into the flow's result and then checked against the
//! result schema, so callers only ever see complete results.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::constants::flows;
use crate::errors::{AppError, ErrorCode, GatewayError};
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{
    BodyAnalysisRequest, BodyAnalysisResult, DailyGoalRequest, DailyGoalResult, DietPlanRequest,
    DietPlanResult, ResultSchema, WorkoutPlanRequest, WorkoutPlanResult,
};

/// Binding of one coaching flow to its request, result and prompt
pub trait Flow {
    /// Flow identifier used in logs and errors
    const NAME: &'static str;
    /// Composed request
    type Request: Send + Sync;
    /// Parsed result
    type Output: DeserializeOwned + ResultSchema + Send;

    /// Natural-language instruction with the request's field bindings
    fn instruction(request: &Self::Request) -> String;
}

/// Workout plan flow
#[derive(Debug, Clone, Copy)]
pub struct WorkoutPlanFlow;

impl Flow for WorkoutPlanFlow {
    const NAME: &'static str = flows::WORKOUT_PLAN;
    type Request = WorkoutPlanRequest;
    type Output = WorkoutPlanResult;

    fn instruction(request: &Self::Request) -> String {
        prompts::workout_plan(request)
    }
}

/// Diet plan flow
#[derive(Debug, Clone, Copy)]
pub struct DietPlanFlow;

impl Flow for DietPlanFlow {
    const NAME: &'static str = flows::DIET_PLAN;
    type Request = DietPlanRequest;
    type Output = DietPlanResult;

    fn instruction(request: &Self::Request) -> String {
        prompts::diet_plan(request)
    }
}

/// Body analysis flow
#[derive(Debug, Clone, Copy)]
pub struct BodyAnalysisFlow;

impl Flow for BodyAnalysisFlow {
    const NAME: &'static str = flows::BODY_ANALYSIS;
    type Request = BodyAnalysisRequest;
    type Output = BodyAnalysisResult;

    fn instruction(request: &Self::Request) -> String {
        prompts::body_analysis(request)
    }
}

/// Daily goal flow
#[derive(Debug, Clone, Copy)]
pub struct DailyGoalFlow;

impl Flow for DailyGoalFlow {
    const NAME: &'static str = flows::DAILY_GOAL;
    type Request = DailyGoalRequest;
    type Output = DailyGoalResult;

    fn instruction(request: &Self::Request) -> String {
        prompts::daily_goal(request)
    }
}

/// Gateway to the text-generation collaborator
#[derive(Clone)]
pub struct AiGateway {
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl AiGateway {
    /// Gateway using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: None,
            temperature: None,
        }
    }

    /// Request a specific model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Request a specific temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Provider behind the gateway
    #[must_use]
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Build the chat request sent for `request`
    #[must_use]
    pub fn build_request<F: Flow>(&self, request: &F::Request) -> ChatRequest {
        let mut chat = ChatRequest::new(vec![
            ChatMessage::system(prompts::get_coach_system_prompt()),
            ChatMessage::user(F::instruction(request)),
        ]);
        if self.provider.capabilities().supports_json_mode() {
            chat = chat.with_json_response();
        }
        if let Some(model) = &self.model {
            chat = chat.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            chat = chat.with_temperature(temperature);
        }
        chat
    }

    /// Send one composed request and parse the typed result
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unavailable` or `RateLimited` when the provider
    /// fails, and `MalformedOutput`, `MissingField` or `InvalidField` when the
    /// reply does not satisfy the flow's result schema.
    #[instrument(skip(self, request), fields(flow = F::NAME, provider = self.provider.name()))]
    pub async fn invoke<F: Flow>(&self, request: &F::Request) -> Result<F::Output, GatewayError> {
        let chat = self.build_request::<F>(request);
        let started = Instant::now();

        let response = self
            .provider
            .complete(&chat)
            .await
            .map_err(|e| provider_failure(F::NAME, &e))?;

        debug!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            model = %response.model,
            "AI service replied"
        );

        parse_output::<F>(&response.content).inspect_err(|e| {
            warn!(error = %e, "AI output rejected");
        })
    }
}

/// Map a provider error onto the gateway taxonomy
fn provider_failure(flow: &'static str, error: &AppError) -> GatewayError {
    match error.code {
        ErrorCode::ExternalRateLimited => GatewayError::RateLimited {
            flow,
            reason: error.message.clone(),
        },
        ErrorCode::ExternalResponseInvalid => GatewayError::MalformedOutput {
            flow,
            reason: error.message.clone(),
        },
        _ => GatewayError::Unavailable {
            flow,
            reason: error.message.clone(),
        },
    }
}

/// Parse a raw reply into the flow's result
///
/// # Errors
///
/// Returns a `GatewayError` naming the flow and, where known, the field.
pub fn parse_output<F: Flow>(raw: &str) -> Result<F::Output, GatewayError> {
    let body = strip_code_fence(raw);
    let value: Value = serde_json::from_str(body).map_err(|e| GatewayError::MalformedOutput {
        flow: F::NAME,
        reason: format!("not valid JSON: {e}"),
    })?;
    if !value.is_object() {
        return Err(GatewayError::MalformedOutput {
            flow: F::NAME,
            reason: "expected a JSON object".to_owned(),
        });
    }

    let output: F::Output =
        serde_json::from_value(value).map_err(|e| classify_decode_error(F::NAME, &e))?;
    output.check_schema(F::NAME)?;
    Ok(output)
}

/// Turn a serde error into `MissingField` when it names an absent field
fn classify_decode_error(flow: &'static str, error: &serde_json::Error) -> GatewayError {
    let message = error.to_string();
    if let Some(rest) = message.strip_prefix("missing field `") {
        if let Some(end) = rest.find('`') {
            return GatewayError::MissingField {
                flow,
                field: rest[..end].to_owned(),
            };
        }
    }
    GatewayError::MalformedOutput {
        flow,
        reason: message,
    }
}

/// Remove a surrounding ``` or ```json fence
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the language tag on the opening line
    inner
        .split_once('\n')
        .map_or(inner, |(first_line, body)| {
            if first_line.trim().chars().all(char::is_alphanumeric) {
                body
            } else {
                inner
            }
        })
        .trim()
}
