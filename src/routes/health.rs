// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness plus readiness that probes the measurement storage backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::constants::service_names::TEEN_FITNESS_COACH;
use crate::resources::CoachResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    #[must_use]
    pub fn routes(resources: Arc<CoachResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<CoachResources>>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": TEEN_FITNESS_COACH,
            "version": env!("CARGO_PKG_VERSION"),
            "ai_provider": resources.gateway.provider().name(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(
        State(resources): State<Arc<CoachResources>>,
    ) -> (StatusCode, Json<Value>) {
        let backend = resources.slot.backend_name();
        match resources.slot.health_check().await {
            Ok(()) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "storage": backend,
                    "sessions": resources.session_count().await,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
            Err(e) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "storage": backend,
                    "error": e.message,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            ),
        }
    }
}
