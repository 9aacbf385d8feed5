// ABOUTME: Daily goal flow types built from the recent measurement history
// ABOUTME: DailyGoalRequest carries the window and trend lines; DailyGoalResult the day's focus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{require_text, FieldTrend, MeasurementRecord, ResultSchema};
use crate::constants::canned;
use crate::errors::GatewayError;

/// Daily goal request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGoalRequest {
    /// Most recent records, oldest first (at most five)
    pub history: Vec<MeasurementRecord>,
    /// Per-field trend over `history`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trend: Vec<FieldTrend>,
}

/// Daily goal result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoalResult {
    /// Area to focus on today
    pub main_focus: String,
    /// One small habit for today
    pub habit_suggestion: String,
    /// Message tied to the progress trend
    pub motivational_message: String,
}

impl DailyGoalResult {
    /// Fixed "first steps" goal for users with fewer than two measurements
    #[must_use]
    pub fn first_steps() -> Self {
        Self {
            main_focus: canned::daily_goal::MAIN_FOCUS.to_owned(),
            habit_suggestion: canned::daily_goal::HABIT_SUGGESTION.to_owned(),
            motivational_message: canned::daily_goal::MOTIVATIONAL_MESSAGE.to_owned(),
        }
    }
}

impl ResultSchema for DailyGoalResult {
    fn check_schema(&self, flow: &'static str) -> Result<(), GatewayError> {
        require_text(flow, "mainFocus", &self.main_focus)?;
        require_text(flow, "habitSuggestion", &self.habit_suggestion)?;
        require_text(flow, "motivationalMessage", &self.motivational_message)
    }
}
