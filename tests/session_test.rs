// ABOUTME: Integration tests for the coaching session orchestration
// ABOUTME: Covers result lifecycle, history appends, canned paths, in-flight rejection and registry bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::{
    body_analysis_json, daily_goal_json, diet_plan_json, record_with_arm, resources_with,
    test_config, test_resources, typical_measurements, workout_plan_json, Reply, StubProvider,
};
use teen_fitness_coach::config::CoachConfig;
use teen_fitness_coach::constants::flows;
use teen_fitness_coach::errors::{AppResult, ErrorCode};
use teen_fitness_coach::gateway::AiGateway;
use teen_fitness_coach::models::{
    BodyAnalysisResult, BodyMeasurements, DailyGoalResult, DietPlanForm, Equipment,
    ExerciseLevel, FitnessLevel, Gender, WorkoutPlanRequest,
};
use teen_fitness_coach::session::CoachSession;
use teen_fitness_coach::storage::{InMemorySlot, KeyValueSlot, MeasurementStore, SlotKey};
use tokio::sync::Notify;

/// Slot whose writes signal `entered` and then never complete
struct StalledWriteSlot {
    inner: InMemorySlot,
    entered: Arc<Notify>,
}

#[async_trait]
impl KeyValueSlot for StalledWriteSlot {
    async fn read(&self, key: &SlotKey) -> AppResult<Option<String>> {
        self.inner.read(key).await
    }

    async fn write(&self, _key: &SlotKey, _value: String) -> AppResult<()> {
        self.entered.notify_one();
        std::future::pending::<AppResult<()>>().await
    }

    async fn remove(&self, key: &SlotKey) -> AppResult<()> {
        self.inner.remove(key).await
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "stalled"
    }
}

fn bounded_config(max_sessions: usize) -> CoachConfig {
    CoachConfig {
        max_sessions,
        ..test_config()
    }
}

fn workout_request() -> WorkoutPlanRequest {
    WorkoutPlanRequest {
        fitness_level: FitnessLevel::Beginner,
        available_equipment: vec![Equipment::Bodyweight],
        time_constraints: 30,
    }
}

fn diet_form() -> DietPlanForm {
    DietPlanForm {
        schedule: "Wake 7, school until 4, gym at 6".to_owned(),
        food_preferences: "Korean food, no shellfish".to_owned(),
        target_calories: 2200,
        current_weight: None,
        target_weight: 60.0,
        height: None,
        age: 16,
        gender: Gender::Female,
        exercise_level: ExerciseLevel::LightlyActive,
    }
}

#[tokio::test]
async fn test_workout_success_is_remembered() {
    let provider = StubProvider::replying(workout_plan_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    let plan = session.submit_workout_plan(workout_request()).await.unwrap();
    assert_eq!(session.results().workout_plan, Some(plan));
    assert_eq!(provider.calls(), 1);
    assert!(session.store().load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failure_clears_previous_result() {
    let provider = StubProvider::scripted(vec![
        Reply::Text(workout_plan_json()),
        Reply::Fail(ErrorCode::ExternalRateLimited, "quota exceeded".to_owned()),
    ]);
    let (resources, _slot) = test_resources(provider);
    let session = resources.session("alice").await;
    let seeded = session
        .store()
        .append(record_with_arm("07.01", 29.0))
        .await
        .unwrap();

    session.submit_workout_plan(workout_request()).await.unwrap();
    let err = session
        .submit_workout_plan(workout_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert!(session.results().workout_plan.is_none());
    assert!(!session.is_in_flight(flows::WORKOUT_PLAN));
    assert_eq!(session.store().load_all().await.unwrap(), seeded);
}

#[tokio::test]
async fn test_invalid_workout_never_reaches_provider() {
    let provider = StubProvider::replying(workout_plan_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    let request = WorkoutPlanRequest {
        time_constraints: 5,
        ..workout_request()
    };
    let err = session.submit_workout_plan(request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_body_analysis_success_appends_record() {
    let provider = StubProvider::replying(body_analysis_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    let analysis = session
        .submit_body_analysis(typical_measurements())
        .await
        .unwrap();

    let history = session.store().load_all().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].measurements, typical_measurements());
    assert_eq!(history[0].date.len(), 5);
    assert_eq!(session.results().body_analysis, Some(analysis));
}

#[tokio::test]
async fn test_body_analysis_failure_does_not_append() {
    let provider = StubProvider::replying(r#"{"title": "반쪽 응답"}"#);
    let (resources, _slot) = test_resources(provider);
    let session = resources.session("alice").await;

    let err = session
        .submit_body_analysis(typical_measurements())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalResponseInvalid);
    assert!(session.store().load_all().await.unwrap().is_empty());
    assert!(session.results().body_analysis.is_none());
}

#[tokio::test]
async fn test_body_analysis_abandoned_during_append_is_not_remembered() {
    let entered = Arc::new(Notify::new());
    let slot = StalledWriteSlot {
        inner: InMemorySlot::new(),
        entered: Arc::clone(&entered),
    };
    let provider = StubProvider::replying(body_analysis_json());
    let session = Arc::new(CoachSession::new(
        "alice",
        MeasurementStore::new(Arc::new(slot), "alice"),
        AiGateway::new(provider.clone()),
        5,
    ));

    let task = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit_body_analysis(typical_measurements()).await })
    };
    entered.notified().await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert_eq!(provider.calls(), 1);
    assert!(session.results().body_analysis.is_none());
    assert!(session.store().load_all().await.unwrap().is_empty());
    assert!(!session.is_in_flight(flows::BODY_ANALYSIS));
}

#[tokio::test]
async fn test_placeholder_body_analysis_is_canned() {
    let provider = StubProvider::replying(body_analysis_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    let analysis = session
        .submit_body_analysis(BodyMeasurements::default())
        .await
        .unwrap();

    assert_eq!(analysis, BodyAnalysisResult::placeholder());
    assert_eq!(provider.calls(), 0);
    assert!(session.store().load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_daily_goal_short_history_is_canned() {
    let provider = StubProvider::replying(daily_goal_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    session
        .store()
        .append(record_with_arm("07.01", 29.0))
        .await
        .unwrap();
    let goal = session.daily_goal().await.unwrap();

    assert_eq!(goal, DailyGoalResult::first_steps());
    assert_eq!(provider.calls(), 0);
    assert_eq!(session.results().daily_goal, Some(goal));
}

#[tokio::test]
async fn test_daily_goal_with_history_calls_provider() {
    let provider = StubProvider::replying(daily_goal_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    for (date, arm) in [("07.01", 29.0), ("07.08", 29.8), ("07.15", 30.5)] {
        session.store().append(record_with_arm(date, arm)).await.unwrap();
    }
    let goal = session.daily_goal().await.unwrap();

    assert_eq!(goal.main_focus, "팔 집중 데이");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_diet_plan_uses_latest_measurement() {
    let provider = StubProvider::replying(diet_plan_json());
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    let err = session.submit_diet_plan(diet_form()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientData);
    assert_eq!(provider.calls(), 0);

    session
        .store()
        .append(record_with_arm("07.01", 29.0))
        .await
        .unwrap();
    session.submit_diet_plan(diet_form()).await.unwrap();

    let prompt = &provider.requests()[0].messages[1].content;
    assert!(prompt.contains("58"));
    assert!(prompt.contains("168"));
}

#[tokio::test]
async fn test_resubmission_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let provider = StubProvider::gated(workout_plan_json(), Arc::clone(&gate));
    let (resources, _slot) = test_resources(provider.clone());
    let session = resources.session("alice").await;

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit_workout_plan(workout_request()).await })
    };

    for _ in 0..200 {
        if session.is_in_flight(flows::WORKOUT_PLAN) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(session.is_in_flight(flows::WORKOUT_PLAN));

    let err = session
        .submit_workout_plan(workout_request())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);

    // other flows are not blocked
    let goal = session.daily_goal().await.unwrap();
    assert_eq!(goal, DailyGoalResult::first_steps());

    gate.notify_one();
    first.await.unwrap().unwrap();
    assert!(!session.is_in_flight(flows::WORKOUT_PLAN));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_sessions_do_not_share_history() {
    let provider = StubProvider::replying(body_analysis_json());
    let (resources, _slot) = test_resources(provider);

    let alice = resources.session("alice").await;
    let bob = resources.session("bob").await;
    alice
        .submit_body_analysis(typical_measurements())
        .await
        .unwrap();

    assert_eq!(alice.store().load_all().await.unwrap().len(), 1);
    assert!(bob.store().load_all().await.unwrap().is_empty());
    assert!(Arc::ptr_eq(&alice, &resources.session("alice").await));
    assert_eq!(resources.session_count().await, 2);
}

#[tokio::test]
async fn test_registry_evicts_least_recently_used_idle_sessions() {
    let provider = StubProvider::replying(workout_plan_json());
    let (resources, _slot) = resources_with(bounded_config(3), provider);

    for i in 0..50 {
        resources.session(&format!("s{i}")).await;
    }
    assert_eq!(resources.session_count().await, 3);

    let kept = resources.session("s49").await;
    let again = resources.session("s49").await;
    assert!(Arc::ptr_eq(&kept, &again));
}

#[tokio::test]
async fn test_evicted_session_reloads_history_from_slot() {
    let provider = StubProvider::replying(workout_plan_json());
    let (resources, _slot) = resources_with(bounded_config(1), provider);

    resources
        .session("alice")
        .await
        .store()
        .append(record_with_arm("07.01", 29.0))
        .await
        .unwrap();
    resources.session("bob").await;
    assert_eq!(resources.session_count().await, 1);

    let alice = resources.session("alice").await;
    assert_eq!(alice.store().load_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_sessions_in_use_are_not_evicted() {
    let provider = StubProvider::replying(workout_plan_json());
    let (resources, _slot) = resources_with(bounded_config(1), provider);

    let alice = resources.session("alice").await;
    let bob = resources.session("bob").await;
    assert_eq!(resources.session_count().await, 2);
    assert!(Arc::ptr_eq(&alice, &resources.session("alice").await));

    drop(alice);
    drop(bob);
    resources.session("carol").await;
    assert_eq!(resources.session_count().await, 1);
}
