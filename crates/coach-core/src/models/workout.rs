// ABOUTME: Workout plan flow request and structured result types
// ABOUTME: FitnessLevel, Equipment, WorkoutPlanRequest, Exercise and WorkoutPlanResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{require_text, ResultSchema};
use crate::constants::measurement_ranges::WORKOUT_MINUTES;
use crate::errors::{GatewayError, ValidationError};

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    /// Three-day full-body split
    Beginner,
    /// Upper/lower split
    Intermediate,
    /// Push/pull/legs split
    Advanced,
}

impl FitnessLevel {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment the user has at hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    /// A pair of dumbbells
    Dumbbells,
    /// No equipment
    Bodyweight,
}

impl Equipment {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dumbbells => "dumbbells",
            Self::Bodyweight => "bodyweight",
        }
    }

    /// Korean label shown on the dashboard
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dumbbells => "덤벨",
            Self::Bodyweight => "맨몸",
        }
    }
}

/// Workout plan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanRequest {
    /// Training experience
    pub fitness_level: FitnessLevel,
    /// Non-empty set of available equipment
    pub available_equipment: Vec<Equipment>,
    /// Session length in minutes (10-120)
    pub time_constraints: u32,
}

impl WorkoutPlanRequest {
    /// Validate the request and normalize the equipment list into a sorted set
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when no equipment is selected and `OutOfRange`
    /// when the session length is outside 10-120 minutes.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.available_equipment.sort_unstable();
        self.available_equipment.dedup();
        if self.available_equipment.is_empty() {
            return Err(ValidationError::MissingField {
                field: "availableEquipment",
            });
        }
        let (min, max) = WORKOUT_MINUTES;
        ValidationError::check_range(
            "timeConstraints",
            f64::from(self.time_constraints),
            min,
            max,
        )?;
        Ok(self)
    }
}

/// One exercise of today's routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Korean exercise name
    pub name: String,
    /// Main muscle group
    pub part: String,
    /// Number of sets
    pub sets: u32,
    /// Reps per set, possibly a range or "to failure"
    pub reps: String,
    /// Rest between sets in seconds
    pub rest: u32,
    /// Short coaching tip
    pub description: String,
}

/// Workout plan result (structured exercise revision)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanResult {
    /// Routine title
    pub title: String,
    /// Exercises in order
    pub workout_plan: Vec<Exercise>,
    /// Coach message
    pub motivational_message: String,
}

impl ResultSchema for WorkoutPlanResult {
    fn check_schema(&self, flow: &'static str) -> Result<(), GatewayError> {
        require_text(flow, "title", &self.title)?;
        require_text(flow, "motivationalMessage", &self.motivational_message)?;
        if self.workout_plan.is_empty() {
            return Err(GatewayError::InvalidField {
                flow,
                field: "workoutPlan".to_owned(),
                reason: "must contain at least one exercise".to_owned(),
            });
        }
        for (index, exercise) in self.workout_plan.iter().enumerate() {
            let prefix = format!("workoutPlan[{index}]");
            require_text(flow, &format!("{prefix}.name"), &exercise.name)?;
            require_text(flow, &format!("{prefix}.part"), &exercise.part)?;
            require_text(flow, &format!("{prefix}.reps"), &exercise.reps)?;
            require_text(flow, &format!("{prefix}.description"), &exercise.description)?;
            if exercise.sets == 0 {
                return Err(GatewayError::InvalidField {
                    flow,
                    field: format!("{prefix}.sets"),
                    reason: "must be at least 1".to_owned(),
                });
            }
        }
        Ok(())
    }
}
