// ABOUTME: Core data models for measurements and the four AI coaching flows
// ABOUTME: Re-exports measurement records, trend types, and per-flow request/result shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Body analysis flow (six-field revision)
pub mod body_analysis;
/// Daily goal flow
pub mod daily_goal;
/// Diet plan flow
pub mod diet;
/// Measurement records and fields
pub mod measurement;
/// Trend classification types shared by the extractor and the daily goal flow
pub mod trend;
/// Workout plan flow (structured exercise revision)
pub mod workout;

pub use body_analysis::{BodyAnalysisRequest, BodyAnalysisResult};
pub use daily_goal::{DailyGoalRequest, DailyGoalResult};
pub use diet::{DietPlanForm, DietPlanRequest, DietPlanResult, ExerciseLevel, Gender};
pub use measurement::{BodyMeasurements, MeasurementField, MeasurementRecord};
pub use trend::{FieldTrend, TrendClassification};
pub use workout::{Equipment, Exercise, FitnessLevel, WorkoutPlanRequest, WorkoutPlanResult};

use crate::errors::GatewayError;

/// Output-side schema check applied to every AI result after parsing.
///
/// Parsing guarantees presence and types; this adds the constraints serde
/// cannot express (non-blank text, non-empty lists, positive counts).
pub trait ResultSchema {
    /// Validate a parsed result for `flow`
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingField` for blank required text and
    /// `GatewayError::InvalidField` for other violations.
    fn check_schema(&self, flow: &'static str) -> Result<(), GatewayError>;
}

/// Reject blank required text in an AI result
///
/// # Errors
///
/// Returns `GatewayError::MissingField` when `value` is empty after trimming.
pub fn require_text(flow: &'static str, field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        Err(GatewayError::MissingField {
            flow,
            field: field.to_owned(),
        })
    } else {
        Ok(())
    }
}
