// ABOUTME: Unified error handling with standard error codes and HTTP status mapping
// ABOUTME: Defines AppError, ErrorCode and the validation / composition / gateway taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the coach eventually surfaces an [`AppError`].
//! Domain layers raise the narrower errors from [`coaching`] and convert them
//! with `?`:
//!
//! - [`ValidationError`]: input fails a schema or range check
//! - [`CompositionError`]: upstream data is insufficient for a flow
//! - [`GatewayError`]: the AI collaborator failed or returned unusable output

/// Validation, composition and gateway error types
pub mod coaching;

#[cfg(feature = "http-response")]
mod http;

pub use coaching::{CompositionError, GatewayError, ValidationError};
#[cfg(feature = "http-response")]
pub use http::{ErrorResponse, ErrorResponseDetails};

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed a schema check
    InvalidInput = 3000,
    /// A required field was absent
    MissingRequiredField = 3001,
    /// A numeric value is outside its declared range
    ValueOutOfRange = 3003,
    /// Upstream data is insufficient to build a request
    InsufficientData = 3004,

    // Resource Management (4000-4999)
    /// A request for the same flow is already in flight
    ResourceLocked = 4002,

    // External Services (5000-5999)
    /// The AI service reported an error
    ExternalServiceError = 5000,
    /// The AI service could not be reached
    ExternalServiceUnavailable = 5001,
    /// The AI service rejected the call because of quota or rate limits
    ExternalRateLimited = 5003,
    /// The AI service answered with output that does not match the flow schema
    ExternalResponseInvalid = 5004,

    // Configuration (6000-6999)
    /// Generic configuration error
    ConfigError = 6000,
    /// Required configuration is absent
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Persisted state could not be read or written
    StorageError = 9002,
    /// Serialization or deserialization failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,
            Self::ResourceLocked => 409,
            Self::InsufficientData => 422,
            Self::ExternalRateLimited => 429,
            Self::ExternalServiceError | Self::ExternalResponseInvalid => 502,
            Self::ExternalServiceUnavailable => 503,
            Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::InsufficientData => "Not enough data is available to complete the request",
            Self::ResourceLocked => "A request is already in progress",
            Self::ExternalServiceError => "The AI service encountered an error",
            Self::ExternalServiceUnavailable => "The AI service is currently unavailable",
            Self::ExternalRateLimited => "The AI service rate limit was exceeded",
            Self::ExternalResponseInvalid => "The AI service returned an unusable response",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error was caused by the caller's input rather than the system
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.http_status() < 500 && self.http_status() != 429
    }
}

/// Unified error type for the application
#[derive(Debug)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured details (e.g. the offending field)
    pub details: serde_json::Value,
    /// Source error for error chaining
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// A request for the same flow is already running
    #[must_use]
    pub fn in_flight(flow: &str) -> Self {
        Self::new(
            ErrorCode::ResourceLocked,
            format!("A {flow} request is already in progress"),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceLocked.http_status(), 409);
        assert_eq!(ErrorCode::ExternalRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::ExternalServiceUnavailable.http_status(), 503);
        assert_eq!(ErrorCode::StorageError.http_status(), 500);
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ErrorCode::ValueOutOfRange.is_client_error());
        assert!(!ErrorCode::ExternalRateLimited.is_client_error());
        assert!(!ErrorCode::InternalError.is_client_error());
    }

    #[test]
    fn test_display_includes_description_and_message() {
        let error = AppError::config("GEMINI_API_KEY environment variable not set");
        let rendered = error.to_string();
        assert!(rendered.starts_with("Configuration error encountered"));
        assert!(rendered.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_serde_json_error_conversion_keeps_source() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(StdError::source(&error).is_some());
    }
}
