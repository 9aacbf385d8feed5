// ABOUTME: Trend extractor over the most recent measurement records
// ABOUTME: Pure per-field delta and improving/plateaued/regressing classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Trend Extractor
//!
//! Looks at the last `window` records (at most five), computes
//! `last - first` for each tracked field and classifies it against a
//! symmetric threshold. Fewer than two records is not an error; it yields
//! [`TrendSignal::InsufficientData`].

use serde::{Deserialize, Serialize};

use crate::constants::trend::{
    CIRCUMFERENCE_THRESHOLD_CM, MAX_TREND_WINDOW, MIN_TREND_RECORDS, WEIGHT_THRESHOLD_KG,
};
use crate::models::{FieldTrend, MeasurementField, MeasurementRecord, TrendClassification};

/// Classification thresholds per kind of field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendThresholds {
    /// Threshold for arm, shoulder, waist and thigh (cm)
    pub circumference_cm: f64,
    /// Threshold for weight (kg)
    pub weight_kg: f64,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            circumference_cm: CIRCUMFERENCE_THRESHOLD_CM,
            weight_kg: WEIGHT_THRESHOLD_KG,
        }
    }
}

impl TrendThresholds {
    /// Threshold applied to `field`
    #[must_use]
    pub const fn for_field(&self, field: MeasurementField) -> f64 {
        match field {
            MeasurementField::Weight => self.weight_kg,
            MeasurementField::Height
            | MeasurementField::Arm
            | MeasurementField::Shoulder
            | MeasurementField::Waist
            | MeasurementField::Thigh => self.circumference_cm,
        }
    }
}

/// Trend over a window of at least two records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Records the trend was computed over, oldest first
    pub window: Vec<MeasurementRecord>,
    /// One entry per tracked field, in `MeasurementField::TRACKED` order
    pub fields: Vec<FieldTrend>,
}

impl TrendReport {
    /// Trend of one field
    #[must_use]
    pub fn get(&self, field: MeasurementField) -> Option<&FieldTrend> {
        self.fields.iter().find(|trend| trend.field == field)
    }
}

/// Result of trend extraction
#[derive(Debug, Clone, PartialEq)]
pub enum TrendSignal {
    /// Fewer than two records in the history
    InsufficientData {
        /// Records available
        available: usize,
    },
    /// Deltas over the window
    Trend(TrendReport),
}

impl TrendSignal {
    /// The report, if enough data was available
    #[must_use]
    pub const fn report(&self) -> Option<&TrendReport> {
        match self {
            Self::Trend(report) => Some(report),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Derive the trend with the default thresholds
#[must_use]
pub fn derive_trend(history: &[MeasurementRecord], window_size: usize) -> TrendSignal {
    derive_trend_with(history, window_size, &TrendThresholds::default())
}

/// Derive the trend over the last `window_size` records of `history`
///
/// `window_size` is clamped to 2..=5.
#[must_use]
pub fn derive_trend_with(
    history: &[MeasurementRecord],
    window_size: usize,
    thresholds: &TrendThresholds,
) -> TrendSignal {
    if history.len() < MIN_TREND_RECORDS {
        return TrendSignal::InsufficientData {
            available: history.len(),
        };
    }

    let window_size = window_size.clamp(MIN_TREND_RECORDS, MAX_TREND_WINDOW);
    let window = &history[history.len().saturating_sub(window_size)..];
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return TrendSignal::InsufficientData {
            available: history.len(),
        };
    };

    let fields = MeasurementField::TRACKED
        .iter()
        .map(|&field| {
            let delta = round_delta(
                field.value(&last.measurements) - field.value(&first.measurements),
            );
            FieldTrend {
                field,
                delta,
                classification: TrendClassification::from_delta(
                    delta,
                    thresholds.for_field(field),
                ),
            }
        })
        .collect();

    TrendSignal::Trend(TrendReport {
        window: window.to_vec(),
        fields,
    })
}

/// Round to hundredths so float noise never crosses a threshold
fn round_delta(delta: f64) -> f64 {
    (delta * 100.0).round() / 100.0
}
