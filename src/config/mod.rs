// ABOUTME: Configuration module for the coaching service
// ABOUTME: Re-exports the environment-driven CoachConfig and its sub-sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the teen fitness coach
//!
//! All settings come from environment variables; the server binary may
//! override the port and data directory from the command line.

/// Environment configuration
pub mod environment;

pub use environment::{CoachConfig, LlmConfig, LogLevel};
