// ABOUTME: Validation, composition and gateway error types for the coaching flows
// ABOUTME: Structured errors that convert into AppError with matching codes and details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::json;
use thiserror::Error;

use super::{AppError, ErrorCode};

/// Input failed a schema or range check.
///
/// Raised before anything is persisted or sent, so callers can re-render the
/// form with the message next to `field`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank
    #[error("{field} is required")]
    MissingField {
        /// Field name as it appears in the form
        field: &'static str,
    },
    /// A numeric value falls outside its closed range
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Field name as it appears in the form
        field: &'static str,
        /// Submitted value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
    /// A numeric value is below its lower bound (no upper bound declared)
    #[error("{field} must be at least {min} (got {value})")]
    BelowMinimum {
        /// Field name as it appears in the form
        field: &'static str,
        /// Submitted value
        value: f64,
        /// Inclusive lower bound
        min: f64,
    },
    /// Free text shorter than required
    #[error("{field} must be at least {min_len} characters")]
    TooShort {
        /// Field name as it appears in the form
        field: &'static str,
        /// Minimum number of characters
        min_len: usize,
    },
}

impl ValidationError {
    /// Name of the offending field
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::OutOfRange { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::TooShort { field, .. } => field,
        }
    }

    /// Check that `value` lies in `[min, max]`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the value is outside the range or not finite.
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        if value.is_finite() && (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }

    /// Check that `value` is at least `min`
    ///
    /// # Errors
    ///
    /// Returns `BelowMinimum` when the value is smaller or not finite.
    pub fn check_minimum(field: &'static str, value: f64, min: f64) -> Result<(), Self> {
        if value.is_finite() && value >= min {
            Ok(())
        } else {
            Err(Self::BelowMinimum { field, value, min })
        }
    }

    /// Check that free text has at least `min_len` characters after trimming
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for blank text and `TooShort` for short text.
    pub fn check_text(field: &'static str, text: &str, min_len: usize) -> Result<(), Self> {
        let length = text.trim().chars().count();
        if length == 0 {
            Err(Self::MissingField { field })
        } else if length < min_len {
            Err(Self::TooShort { field, min_len })
        } else {
            Ok(())
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        let code = match error {
            ValidationError::MissingField { .. } => ErrorCode::MissingRequiredField,
            ValidationError::OutOfRange { .. } | ValidationError::BelowMinimum { .. } => {
                ErrorCode::ValueOutOfRange
            }
            ValidationError::TooShort { .. } => ErrorCode::InvalidInput,
        };
        Self::new(code, error.to_string()).with_details(json!({ "field": error.field() }))
    }
}

/// Upstream data is insufficient to compose a request for a non-fallback flow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// A field that should have come from the form or the stored history is absent
    #[error("{flow} request needs '{field}' but neither the form nor the history provides it")]
    MissingUpstreamField {
        /// Flow being composed
        flow: &'static str,
        /// Missing field
        field: &'static str,
    },
    /// Not enough measurement records to build a history-based request
    #[error("{flow} request needs at least {required} measurements, {available} available")]
    InsufficientHistory {
        /// Flow being composed
        flow: &'static str,
        /// Minimum number of records
        required: usize,
        /// Records actually available
        available: usize,
    },
}

impl From<CompositionError> for AppError {
    fn from(error: CompositionError) -> Self {
        Self::new(ErrorCode::InsufficientData, error.to_string())
    }
}

/// The AI collaborator failed or returned output that does not fit the flow schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The collaborator could not be reached or answered with a transport/API error
    #[error("{flow}: AI service unavailable: {reason}")]
    Unavailable {
        /// Flow being invoked
        flow: &'static str,
        /// Underlying failure
        reason: String,
    },
    /// The collaborator rejected the call because of quota or rate limits
    #[error("{flow}: {reason}")]
    RateLimited {
        /// Flow being invoked
        flow: &'static str,
        /// User-facing quota message
        reason: String,
    },
    /// The output is not a JSON object of the expected shape
    #[error("{flow}: malformed AI output: {reason}")]
    MalformedOutput {
        /// Flow being invoked
        flow: &'static str,
        /// Parse failure description
        reason: String,
    },
    /// A required result field is absent or blank
    #[error("{flow}: AI output is missing required field '{field}'")]
    MissingField {
        /// Flow being invoked
        flow: &'static str,
        /// Result field name
        field: String,
    },
    /// A result field is present but violates the schema
    #[error("{flow}: AI output field '{field}' is invalid: {reason}")]
    InvalidField {
        /// Flow being invoked
        flow: &'static str,
        /// Result field name
        field: String,
        /// Constraint that failed
        reason: String,
    },
}

impl GatewayError {
    /// Flow on which the failure happened
    #[must_use]
    pub const fn flow(&self) -> &'static str {
        match self {
            Self::Unavailable { flow, .. }
            | Self::RateLimited { flow, .. }
            | Self::MalformedOutput { flow, .. }
            | Self::MissingField { flow, .. }
            | Self::InvalidField { flow, .. } => flow,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(error: GatewayError) -> Self {
        let code = match error {
            GatewayError::Unavailable { .. } => ErrorCode::ExternalServiceUnavailable,
            GatewayError::RateLimited { .. } => ErrorCode::ExternalRateLimited,
            GatewayError::MalformedOutput { .. }
            | GatewayError::MissingField { .. }
            | GatewayError::InvalidField { .. } => ErrorCode::ExternalResponseInvalid,
        };
        let flow = error.flow();
        Self::new(code, error.to_string())
            .with_details(json!({ "flow": flow }))
            .with_source(error)
    }
}
