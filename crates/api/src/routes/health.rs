//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Payload returned by `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process is serving requests.
    pub status: &'static str,
    /// Crate version the binary was built from.
    pub version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Router for the unauthenticated liveness check.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
