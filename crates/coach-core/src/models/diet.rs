// ABOUTME: Diet plan flow form, request and markdown result types
// ABOUTME: Gender, ExerciseLevel, DietPlanForm with optional history-backed fields, DietPlanRequest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{require_text, ResultSchema};
use crate::constants::measurement_ranges::{
    AGE_YEARS, DIET_MIN_HEIGHT_CM, DIET_MIN_WEIGHT_KG, DIET_TEXT_MIN_LEN, TARGET_CALORIES,
};
use crate::errors::{GatewayError, ValidationError};

/// Gender of the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Habitual activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseLevel {
    /// Little or no exercise
    #[serde(rename = "sedentary")]
    Sedentary,
    /// Light exercise 1-3 days a week
    #[serde(rename = "lightly active")]
    LightlyActive,
    /// Moderate exercise 3-5 days a week
    #[serde(rename = "moderately active")]
    ModeratelyActive,
    /// Hard exercise 6-7 days a week
    #[serde(rename = "very active")]
    VeryActive,
    /// Very hard exercise or a physical job
    #[serde(rename = "extra active")]
    ExtraActive,
}

impl ExerciseLevel {
    /// Wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly active",
            Self::ModeratelyActive => "moderately active",
            Self::VeryActive => "very active",
            Self::ExtraActive => "extra active",
        }
    }
}

impl fmt::Display for ExerciseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diet plan form as submitted.
///
/// `current_weight` and `height` may be left empty; the composer then takes
/// them from the latest stored measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanForm {
    /// Typical daily schedule
    pub schedule: String,
    /// Preferences, restrictions and allergies
    pub food_preferences: String,
    /// Daily calorie target
    pub target_calories: u32,
    /// Current weight in kg
    #[serde(default)]
    pub current_weight: Option<f64>,
    /// Target weight in kg
    pub target_weight: f64,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Activity level
    pub exercise_level: ExerciseLevel,
}

/// Complete diet plan request sent to the AI service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRequest {
    /// Typical daily schedule
    pub schedule: String,
    /// Preferences, restrictions and allergies
    pub food_preferences: String,
    /// Daily calorie target (1000-5000)
    pub target_calories: u32,
    /// Current weight in kg (>= 30)
    pub current_weight: f64,
    /// Target weight in kg (>= 30)
    pub target_weight: f64,
    /// Height in cm (>= 100)
    pub height: f64,
    /// Age in years (13-19)
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Activity level
    pub exercise_level: ExerciseLevel,
}

impl DietPlanRequest {
    /// Check every field constraint
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_text("schedule", &self.schedule, DIET_TEXT_MIN_LEN)?;
        ValidationError::check_text("foodPreferences", &self.food_preferences, DIET_TEXT_MIN_LEN)?;
        let (min, max) = TARGET_CALORIES;
        ValidationError::check_range("targetCalories", f64::from(self.target_calories), min, max)?;
        ValidationError::check_minimum("currentWeight", self.current_weight, DIET_MIN_WEIGHT_KG)?;
        ValidationError::check_minimum("targetWeight", self.target_weight, DIET_MIN_WEIGHT_KG)?;
        ValidationError::check_minimum("height", self.height, DIET_MIN_HEIGHT_CM)?;
        let (min, max) = AGE_YEARS;
        ValidationError::check_range("age", f64::from(self.age), min, max)?;
        Ok(())
    }
}

/// Diet plan result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanResult {
    /// Markdown-formatted plan with meals and timings
    pub diet_plan: String,
}

impl ResultSchema for DietPlanResult {
    fn check_schema(&self, flow: &'static str) -> Result<(), GatewayError> {
        require_text(flow, "dietPlan", &self.diet_plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_level_uses_spaced_wire_names() {
        let level: ExerciseLevel = serde_json::from_str(r#""moderately active""#).unwrap();
        assert_eq!(level, ExerciseLevel::ModeratelyActive);
        assert_eq!(
            serde_json::to_string(&ExerciseLevel::ExtraActive).unwrap(),
            r#""extra active""#
        );
    }

    #[test]
    fn test_form_allows_missing_weight_and_height() {
        let form: DietPlanForm = serde_json::from_str(
            r#"{
                "schedule": "School 8-4, homework until 7",
                "foodPreferences": "Chicken and rice, no peanuts",
                "targetCalories": 2200,
                "targetWeight": 70,
                "age": 16,
                "gender": "male",
                "exerciseLevel": "very active"
            }"#,
        )
        .unwrap();
        assert!(form.current_weight.is_none());
        assert!(form.height.is_none());
    }
}
