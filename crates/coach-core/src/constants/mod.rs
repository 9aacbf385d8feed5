// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Measurement ranges, trend thresholds, flow names, storage keys and canned copy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file.

/// Fixed fallback copy returned without contacting the AI service
pub mod canned;
/// Physiological ranges accepted at capture time
pub mod measurement_ranges;

/// Trend extraction parameters
pub mod trend {
    /// Largest number of most-recent records considered by the trend extractor
    pub const MAX_TREND_WINDOW: usize = 5;
    /// Fewest records needed before any delta is computed
    pub const MIN_TREND_RECORDS: usize = 2;
    /// Change (cm) below which a circumference counts as plateaued
    pub const CIRCUMFERENCE_THRESHOLD_CM: f64 = 0.3;
    /// Change (kg) below which body weight counts as plateaued
    pub const WEIGHT_THRESHOLD_KG: f64 = 0.5;
}

/// Flow identifiers used in logs, prompts and error messages
pub mod flows {
    /// Workout plan generation
    pub const WORKOUT_PLAN: &str = "workoutPlan";
    /// Diet plan generation
    pub const DIET_PLAN: &str = "dietPlan";
    /// Body measurement analysis
    pub const BODY_ANALYSIS: &str = "bodyAnalysis";
    /// Daily goal generation
    pub const DAILY_GOAL: &str = "dailyGoal";
}

/// Persisted state layout
pub mod storage {
    /// Slot name holding the JSON-serialized measurement history
    pub const MEASUREMENT_SLOT: &str = "measurementData";
    /// Session used when the client does not identify itself
    pub const DEFAULT_SESSION_ID: &str = "default";
    /// Header carrying the client session id
    pub const SESSION_HEADER: &str = "x-session-id";
    /// Directory name under the platform data dir
    pub const DATA_DIR_NAME: &str = "teen-fitness-coach";
    /// Live sessions kept in memory before the least recently used is dropped
    pub const DEFAULT_MAX_SESSIONS: usize = 1000;
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Service identity for logs
pub mod service_names {
    /// Service name reported at startup
    pub const TEEN_FITNESS_COACH: &str = "teen-fitness-coach";
}
