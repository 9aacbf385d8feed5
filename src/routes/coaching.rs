// ABOUTME: Coaching flow route handlers for workout, diet, body analysis and daily goal
// ABOUTME: Wraps flow outcomes in the success/error ActionResult envelope with Korean failure text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Coaching routes
//!
//! The client session is chosen by the `x-session-id` header. Malformed or
//! out-of-range input is rejected with a 400 [`ErrorResponse`]; every other
//! failure is reported as `{"success": false, "error": "<prefix>: <reason>"}`
//! with the status of the underlying error.
//!
//! [`ErrorResponse`]: crate::errors::ErrorResponse

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::constants::canned::failure_prefix;
use crate::constants::storage::{DEFAULT_SESSION_ID, SESSION_HEADER};
use crate::errors::{AppError, ErrorCode};
use crate::models::{BodyMeasurements, DietPlanForm, WorkoutPlanRequest};
use crate::presenter;
use crate::resources::CoachResources;
use crate::session::CoachSession;

/// Result envelope of a coaching action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    /// Whether the action produced a result
    pub success: bool,
    /// Result on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// User-facing message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    /// Successful outcome
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome, message prefixed with the flow's failure text
    #[must_use]
    pub fn failed(prefix: &str, error: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(format!("{prefix}: {}", error.message)),
        }
    }
}

/// Coaching routes
pub struct CoachingRoutes;

impl CoachingRoutes {
    /// Create all coaching routes
    #[must_use]
    pub fn routes(resources: Arc<CoachResources>) -> Router {
        Router::new()
            .route("/api/measurements", get(Self::handle_measurements))
            .route("/api/workout-plan", post(Self::handle_workout_plan))
            .route("/api/diet-plan", post(Self::handle_diet_plan))
            .route("/api/body-analysis", post(Self::handle_body_analysis))
            .route("/api/daily-goal", get(Self::handle_daily_goal))
            .with_state(resources)
    }

    async fn session(resources: &CoachResources, headers: &HeaderMap) -> Arc<CoachSession> {
        let session_id = headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID);
        resources.session(session_id).await
    }

    /// Turn an axum JSON rejection into a 400 `AppError`
    fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
        payload
            .map(|Json(value)| value)
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
    }

    fn respond<T: Serialize>(
        prefix: &str,
        outcome: Result<T, AppError>,
    ) -> Result<Response, AppError> {
        match outcome {
            Ok(view) => Ok((StatusCode::OK, Json(ActionResult::ok(view))).into_response()),
            Err(e) if is_validation(e.code) => Err(e),
            Err(e) => {
                let status = StatusCode::from_u16(e.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Ok((status, Json(ActionResult::<T>::failed(prefix, &e))).into_response())
            }
        }
    }

    async fn handle_measurements(
        State(resources): State<Arc<CoachResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = Self::session(&resources, &headers).await;
        let history = session.store().load_all().await?;
        Ok((StatusCode::OK, Json(presenter::present_progress(history))).into_response())
    }

    async fn handle_workout_plan(
        State(resources): State<Arc<CoachResources>>,
        headers: HeaderMap,
        payload: Result<Json<WorkoutPlanRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = Self::body(payload)?;
        let session = Self::session(&resources, &headers).await;
        let outcome = session
            .submit_workout_plan(request)
            .await
            .map(|result| presenter::present_workout_plan(&result));
        Self::respond(failure_prefix::WORKOUT_PLAN, outcome)
    }

    async fn handle_diet_plan(
        State(resources): State<Arc<CoachResources>>,
        headers: HeaderMap,
        payload: Result<Json<DietPlanForm>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let form = Self::body(payload)?;
        let session = Self::session(&resources, &headers).await;
        let outcome = session
            .submit_diet_plan(form)
            .await
            .map(|result| presenter::present_diet_plan(&result));
        Self::respond(failure_prefix::DIET_PLAN, outcome)
    }

    async fn handle_body_analysis(
        State(resources): State<Arc<CoachResources>>,
        headers: HeaderMap,
        payload: Result<Json<BodyMeasurements>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let measurements = Self::body(payload)?;
        let session = Self::session(&resources, &headers).await;
        let outcome = session
            .submit_body_analysis(measurements)
            .await
            .map(|result| presenter::present_body_analysis(&result));
        Self::respond(failure_prefix::BODY_ANALYSIS, outcome)
    }

    async fn handle_daily_goal(
        State(resources): State<Arc<CoachResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let session = Self::session(&resources, &headers).await;
        let outcome = session
            .daily_goal()
            .await
            .map(|result| presenter::present_daily_goal(&result));
        Self::respond(failure_prefix::DAILY_GOAL, outcome)
    }
}

const fn is_validation(code: ErrorCode) -> bool {
    matches!(
        code,
        ErrorCode::InvalidInput | ErrorCode::MissingRequiredField | ErrorCode::ValueOutOfRange
    )
}
