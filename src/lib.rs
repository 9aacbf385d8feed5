// ABOUTME: Main library entry point for the teen fitness coaching service
// ABOUTME: Measurement history, trend extraction, AI-generated plans and the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Teen Fitness Coach
//!
//! Coaching backend for teenagers: it stores body measurements per client
//! session, derives short-term trends from them and asks an AI service for
//! workout plans, diet plans, body analyses and daily goals.
//!
//! ## Architecture
//!
//! - **Storage**: scoped key-value slots and the append-only measurement store
//! - **Intelligence**: the trend extractor
//! - **Composer**: form input plus history into flow requests or canned results
//! - **Gateway**: one provider call per request, schema-checked typed results
//! - **Presenter**: display values for the web client
//! - **Session / Routes**: per-client state and the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use teen_fitness_coach::config::CoachConfig;
//! use teen_fitness_coach::storage::{FileSlot, MeasurementStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CoachConfig::from_env()?;
//!     let slot = Arc::new(FileSlot::open(&config.data_dir).await?);
//!     let store = MeasurementStore::new(slot, "default");
//!     println!("{} records stored", store.load_all().await?.len());
//!     Ok(())
//! }
//! ```

pub use coach_core::{constants, errors, models};

/// Request composition and fallback decisions
pub mod composer;
/// Environment configuration
pub mod config;
/// AI gateway adapter
pub mod gateway;
/// Trend extraction
pub mod intelligence;
/// LLM provider abstraction and prompts
pub mod llm;
/// Structured logging
pub mod logging;
/// HTTP middleware
pub mod middleware;
/// Display formatting of results
pub mod presenter;
/// Shared server resources
pub mod resources;
/// HTTP routes
pub mod routes;
/// Per-client coaching sessions
pub mod session;
/// Persistence
pub mod storage;
