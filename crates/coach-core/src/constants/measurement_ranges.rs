// ABOUTME: Physiological ranges for body measurements and diet-plan form fields
// ABOUTME: Inclusive bounds checked when a record or form is captured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Inclusive `(min, max)` range
pub type Range = (f64, f64);

/// Height in cm
pub const HEIGHT_CM: Range = (100.0, 250.0);
/// Body weight in kg
pub const WEIGHT_KG: Range = (30.0, 200.0);
/// Arm circumference in cm
pub const ARM_CM: Range = (10.0, 100.0);
/// Shoulder circumference in cm
pub const SHOULDER_CM: Range = (50.0, 200.0);
/// Waist circumference in cm
pub const WAIST_CM: Range = (50.0, 150.0);
/// Thigh circumference in cm
pub const THIGH_CM: Range = (30.0, 100.0);

/// Workout session length in minutes
pub const WORKOUT_MINUTES: Range = (10.0, 120.0);
/// Daily calorie target
pub const TARGET_CALORIES: Range = (1000.0, 5000.0);
/// Age of the teenage user in years
pub const AGE_YEARS: Range = (13.0, 19.0);
/// Lower bound for current/target weight on the diet form (no upper bound)
pub const DIET_MIN_WEIGHT_KG: f64 = 30.0;
/// Lower bound for height on the diet form (no upper bound)
pub const DIET_MIN_HEIGHT_CM: f64 = 100.0;
/// Minimum characters for free-text diet form fields
pub const DIET_TEXT_MIN_LEN: usize = 10;
