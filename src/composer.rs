// ABOUTME: Request composer turning validated form input plus stored history into flow requests
// ABOUTME: Returns an explicit Canned-or-GatewayCall decision for flows with a fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Request Composer
//!
//! Every compose function validates its input first. Flows with a fixed
//! fallback return a [`FlowDecision`] so the caller decides whether to
//! contact the AI service by matching on a value, not by re-checking the
//! fallback condition.

use crate::constants::flows;
use crate::constants::trend::{MAX_TREND_WINDOW, MIN_TREND_RECORDS};
use crate::errors::{AppResult, CompositionError};
use crate::intelligence::{derive_trend, TrendSignal};
use crate::models::{
    BodyAnalysisRequest, BodyAnalysisResult, BodyMeasurements, DailyGoalRequest, DailyGoalResult,
    DietPlanForm, DietPlanRequest, MeasurementRecord, WorkoutPlanRequest,
};

/// Outcome of composing a flow that has a fixed fallback
#[derive(Debug, Clone, PartialEq)]
pub enum FlowDecision<R, Q> {
    /// Show this fixed result; do not contact the AI service
    Canned(R),
    /// Send this request to the AI service
    GatewayCall(Q),
}

impl<R, Q> FlowDecision<R, Q> {
    /// Whether the AI service will be contacted
    #[must_use]
    pub const fn is_gateway_call(&self) -> bool {
        matches!(self, Self::GatewayCall(_))
    }
}

/// Compose a workout plan request
///
/// # Errors
///
/// Returns a validation error for an empty equipment set or a session
/// length outside 10-120 minutes.
pub fn compose_workout_plan(request: WorkoutPlanRequest) -> AppResult<WorkoutPlanRequest> {
    Ok(request.validated()?)
}

/// Compose a diet plan request, filling weight and height from `latest`
/// when the form leaves them empty
///
/// # Errors
///
/// Returns `CompositionError::MissingUpstreamField` when neither the form
/// nor the history supplies weight or height, otherwise the first violated
/// field constraint.
pub fn compose_diet_plan(
    form: DietPlanForm,
    latest: Option<&MeasurementRecord>,
) -> AppResult<DietPlanRequest> {
    let stored = latest.map(|record| &record.measurements);

    let current_weight = form
        .current_weight
        .or_else(|| stored.map(|m| m.weight_kg))
        .ok_or(CompositionError::MissingUpstreamField {
            flow: flows::DIET_PLAN,
            field: "currentWeight",
        })?;
    let height = form
        .height
        .or_else(|| stored.map(|m| m.height_cm))
        .ok_or(CompositionError::MissingUpstreamField {
            flow: flows::DIET_PLAN,
            field: "height",
        })?;

    let request = DietPlanRequest {
        schedule: form.schedule,
        food_preferences: form.food_preferences,
        target_calories: form.target_calories,
        current_weight,
        target_weight: form.target_weight,
        height,
        age: form.age,
        gender: form.gender,
        exercise_level: form.exercise_level,
    };
    request.validate()?;
    Ok(request)
}

/// Compose a body analysis request
///
/// The all-zero form placeholder yields the canned "please enter your data"
/// result without validation; anything else must be in range.
///
/// # Errors
///
/// Returns a validation error for a measurement outside its range.
pub fn compose_body_analysis(
    measurements: BodyMeasurements,
) -> AppResult<FlowDecision<BodyAnalysisResult, BodyAnalysisRequest>> {
    if measurements.is_placeholder() {
        return Ok(FlowDecision::Canned(BodyAnalysisResult::placeholder()));
    }
    measurements.validate()?;
    Ok(FlowDecision::GatewayCall(measurements))
}

/// Compose a daily goal from the stored history
///
/// Fewer than two records yields the canned "first steps" goal. Otherwise
/// the request carries the last `window` records (clamped to 2..=5) and
/// their trend.
#[must_use]
pub fn compose_daily_goal(
    history: &[MeasurementRecord],
    window: usize,
) -> FlowDecision<DailyGoalResult, DailyGoalRequest> {
    match compose_daily_goal_request(history, window) {
        Ok(request) => FlowDecision::GatewayCall(request),
        Err(_) => FlowDecision::Canned(DailyGoalResult::first_steps()),
    }
}

/// Daily goal request without the fallback
///
/// # Errors
///
/// Returns `CompositionError::InsufficientHistory` for fewer than two records.
pub fn compose_daily_goal_request(
    history: &[MeasurementRecord],
    window: usize,
) -> Result<DailyGoalRequest, CompositionError> {
    match derive_trend(history, window.min(MAX_TREND_WINDOW)) {
        TrendSignal::InsufficientData { available } => Err(CompositionError::InsufficientHistory {
            flow: flows::DAILY_GOAL,
            required: MIN_TREND_RECORDS,
            available,
        }),
        TrendSignal::Trend(report) => Ok(DailyGoalRequest {
            history: report.window,
            trend: report.fields,
        }),
    }
}
