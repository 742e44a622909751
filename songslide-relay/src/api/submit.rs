//! Submission relay endpoint
//!
//! Accepts an arbitrary JSON payload (expected shape: the canonical weekly
//! record, but not enforced) and forwards it unmodified to the configured
//! upstream script URL. The upstream's JSON body is returned verbatim on
//! success; every failure collapses to one generic 500 response, with the
//! specific cause logged server-side only.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::AppState;

/// Failure modes of the outbound call; logged, never surfaced to callers
#[derive(Debug, Error)]
enum RelayError {
    /// Send failure, timeout, or non-JSON upstream body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {0}: {1}")]
    UpstreamStatus(u16, String),
}

/// POST /api/submit
///
/// No request validation and no retry: the caller resubmits manually on
/// failure. A failed request never affects subsequent ones.
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    match relay(&state, &payload).await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => {
            error!("Relay to upstream failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Something went wrong" })),
            )
        }
    }
}

/// One outbound POST of the exact inbound payload
async fn relay(state: &AppState, payload: &Value) -> Result<Value, RelayError> {
    let response = state
        .http
        .post(&state.upstream_url)
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RelayError::UpstreamStatus(status.as_u16(), body));
    }

    Ok(response.json().await?)
}
