// ABOUTME: Body analysis flow types for the six-field measurement revision
// ABOUTME: Request is the measurement set; result carries analysis, recommendation and a growth tip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{require_text, BodyMeasurements, ResultSchema};
use crate::constants::canned;
use crate::errors::GatewayError;

/// Body analysis request: the six current measurements
pub type BodyAnalysisRequest = BodyMeasurements;

/// Body analysis result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysisResult {
    /// Card title
    pub title: String,
    /// Strengths and balance of the current physique
    pub analysis: String,
    /// Exercises to focus on
    pub recommendation: String,
    /// Sleep, nutrition and posture advice for height growth
    pub height_growth_tip: String,
}

impl BodyAnalysisResult {
    /// Fixed result shown while the form still holds its all-zero placeholder
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            title: canned::body_analysis::TITLE.to_owned(),
            analysis: canned::body_analysis::ANALYSIS.to_owned(),
            recommendation: canned::body_analysis::RECOMMENDATION.to_owned(),
            height_growth_tip: canned::body_analysis::HEIGHT_GROWTH_TIP.to_owned(),
        }
    }
}

impl ResultSchema for BodyAnalysisResult {
    fn check_schema(&self, flow: &'static str) -> Result<(), GatewayError> {
        require_text(flow, "title", &self.title)?;
        require_text(flow, "analysis", &self.analysis)?;
        require_text(flow, "recommendation", &self.recommendation)?;
        require_text(flow, "heightGrowthTip", &self.height_growth_tip)
    }
}
