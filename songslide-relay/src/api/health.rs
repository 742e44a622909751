//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "ok" while the process is serving)
    pub status: String,
    /// Module name ("songslide-relay")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
}

/// GET /health
///
/// Health check endpoint for monitoring. The relay holds no state that can
/// degrade, so reachability is the whole signal.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "songslide-relay".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
