// ABOUTME: Per-field trend classification shared by the extractor and the daily goal flow
// ABOUTME: TrendClassification and FieldTrend values derived from a measurement window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::MeasurementField;

/// Coarse direction of change of one measurement over the trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendClassification {
    /// Grew by more than the field's threshold
    Improving,
    /// Changed by no more than the threshold in either direction
    Plateaued,
    /// Shrank by more than the threshold
    Regressing,
}

impl TrendClassification {
    /// Classify `delta` against a symmetric `threshold`
    #[must_use]
    pub fn from_delta(delta: f64, threshold: f64) -> Self {
        if delta > threshold {
            Self::Improving
        } else if delta < -threshold {
            Self::Regressing
        } else {
            Self::Plateaued
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Plateaued => "plateaued",
            Self::Regressing => "regressing",
        }
    }
}

impl fmt::Display for TrendClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delta and classification of one tracked field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldTrend {
    /// Measurement the trend describes
    pub field: MeasurementField,
    /// `last - first` over the window
    pub delta: f64,
    /// Direction of change
    pub classification: TrendClassification,
}
