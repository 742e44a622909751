//! songslide-relay library - Submission forwarder
//!
//! Single-route relay that accepts weekly record submissions from the
//! browser-facing tools and forwards them to the Apps Script endpoint,
//! keeping the secret script URL server-side.

use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod config;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client (timeout configured at startup)
    pub http: reqwest::Client,
    /// Upstream script endpoint submissions are relayed to
    pub upstream_url: String,
}

impl AppState {
    /// Create new application state
    pub fn new(http: reqwest::Client, upstream_url: String) -> Self {
        Self { http, upstream_url }
    }
}

/// Build application router
///
/// One submission route plus the health endpoint; CORS is open to all
/// origins since the relay itself is the trust boundary pass-through.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/api/submit", post(api::submit))
        .merge(api::health_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}
