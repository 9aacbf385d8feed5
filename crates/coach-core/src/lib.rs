// ABOUTME: Core types and constants for the teen fitness coach
// ABOUTME: Foundation crate with error handling, measurement and flow models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Foundation crate providing shared types and constants for the teen fitness
//! coach. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   validation / composition / gateway error taxonomy
//! - **constants**: Measurement ranges, trend thresholds and canned results
//! - **models**: Measurement records and the request/result shapes of each AI flow

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (measurements, flow requests and results)
pub mod models;
