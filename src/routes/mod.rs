// ABOUTME: Route module organization for the coaching HTTP API
// ABOUTME: Assembles health and coaching routes with tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Handlers are grouped by domain; [`router`] mounts all of them on the
//! shared [`CoachResources`].

/// Coaching flow and progress routes
pub mod coaching;
/// Health and readiness routes
pub mod health;

pub use coaching::{ActionResult, CoachingRoutes};
pub use health::HealthRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::setup_cors;
use crate::resources::CoachResources;

/// Build the complete application router
#[must_use]
pub fn router(resources: Arc<CoachResources>) -> Router {
    let cors = setup_cors(&resources.config.cors_allowed_origins);
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(CoachingRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
