// ABOUTME: Derived insights computed from the stored measurement history
// ABOUTME: Currently the trend extractor feeding the daily goal flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Per-field deltas and plateau signals over the most recent records
pub mod trend;

pub use trend::{derive_trend, derive_trend_with, TrendReport, TrendSignal, TrendThresholds};
