// ABOUTME: Environment configuration for the coaching service
// ABOUTME: Parses port, data directory, Gemini settings and trend window from env variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{ports, storage, trend};

/// Default Gemini model
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default level
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Settings for the Gemini collaborator
#[derive(Clone, Default)]
pub struct LlmConfig {
    /// API key, absent when `GEMINI_API_KEY` is unset
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Optional sampling temperature
    pub temperature: Option<f32>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// HTTP port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Directory that holds one file per session slot
    pub data_dir: PathBuf,
    /// Number of most recent records the trend extractor looks at
    pub trend_window: usize,
    /// Live sessions kept in memory; histories stay in the slot backend
    pub max_sessions: usize,
    /// Comma-separated browser origins allowed by CORS, `*` for any
    pub cors_allowed_origins: String,
    /// Collaborator settings
    pub llm: LlmConfig,
}

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or no data
    /// directory can be determined.
    pub fn from_env() -> Result<Self> {
        let http_port = env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;

        let trend_window = parse_trend_window(&env_var_or(
            "COACH_TREND_WINDOW",
            &trend::MAX_TREND_WINDOW.to_string(),
        ))?;

        let max_sessions = parse_max_sessions(&env_var_or(
            "COACH_MAX_SESSIONS",
            &storage::DEFAULT_MAX_SESSIONS.to_string(),
        ))?;

        Ok(Self {
            http_port,
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            data_dir: data_dir_from_env()?,
            trend_window,
            max_sessions,
            cors_allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            llm: LlmConfig::from_env()?,
        })
    }

    /// Human-readable summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Teen Fitness Coach Configuration:\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Data Directory: {}\n\
             - Trend Window: {}\n\
             - Max Sessions: {}\n\
             - CORS Origins: {}\n\
             - LLM Model: {}\n\
             - LLM API Key: {}",
            self.http_port,
            self.log_level,
            self.data_dir.display(),
            self.trend_window,
            self.max_sessions,
            self.cors_allowed_origins,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "Configured"
            } else {
                "Missing"
            },
        )
    }
}

impl LlmConfig {
    /// Load Gemini settings from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `COACH_LLM_TEMPERATURE` is not a number.
    pub fn from_env() -> Result<Self> {
        let temperature = match env::var("COACH_LLM_TEMPERATURE") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<f32>()
                    .context("Invalid COACH_LLM_TEMPERATURE value")?,
            ),
            _ => None,
        };

        Ok(Self {
            api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env_var_or("COACH_LLM_MODEL", DEFAULT_LLM_MODEL),
            temperature,
        })
    }
}

/// Parse the trend window and clamp it to the supported range
fn parse_trend_window(raw: &str) -> Result<usize> {
    let requested: usize = raw
        .trim()
        .parse()
        .context("Invalid COACH_TREND_WINDOW value")?;
    let clamped = requested.clamp(trend::MIN_TREND_RECORDS, trend::MAX_TREND_WINDOW);
    if clamped != requested {
        warn!(
            requested,
            clamped, "COACH_TREND_WINDOW out of range, clamping"
        );
    }
    Ok(clamped)
}

/// Parse the session registry bound; zero is rejected
fn parse_max_sessions(raw: &str) -> Result<usize> {
    let max: usize = raw
        .trim()
        .parse()
        .context("Invalid COACH_MAX_SESSIONS value")?;
    if max == 0 {
        bail!("COACH_MAX_SESSIONS must be at least 1");
    }
    Ok(max)
}

fn data_dir_from_env() -> Result<PathBuf> {
    if let Ok(dir) = env::var("COACH_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::data_dir()
        .map(|base| base.join(storage::DATA_DIR_NAME))
        .context("No platform data directory available; set COACH_DATA_DIR")
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
