//! Remote collaborators of the record builder
//!
//! Two calls, both optional for correctness of the record transform:
//! - `fetch_songs`: GET the songs source (a JSON array of sheet rows) to
//!   preload the draft's song list.
//! - `update_slides`: POST the canonical record to the slide-update service
//!   and return its confirmation message.
//!
//! Both return explicit results; the caller decides per contract whether a
//! failure is surfaced (slide update) or logged and swallowed (preload).

use serde::Deserialize;
use songslide_common::{CanonicalRecord, SongRow};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("songslide/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote call errors
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Connection failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body was not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Slide-update service response
#[derive(Debug, Clone, Deserialize)]
pub struct SlideUpdateResponse {
    /// Human-readable confirmation, surfaced to the user as-is
    pub message: String,
}

/// HTTP client for the songs source and the slide-update service
pub struct RemoteClient {
    http: reqwest::Client,
}

impl RemoteClient {
    pub fn new() -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        Ok(Self { http })
    }

    /// Fetch the remote song rows, in sheet order
    pub async fn fetch_songs(&self, songs_url: &str) -> Result<Vec<SongRow>, RemoteError> {
        tracing::debug!(url = %songs_url, "Fetching songs from remote source");

        let response = self
            .http
            .get(songs_url)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(status.as_u16(), body));
        }

        let rows: Vec<SongRow> = response
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        tracing::info!(count = rows.len(), "Fetched songs from remote source");
        Ok(rows)
    }

    /// Push the canonical record to `<base>/update-slides`
    pub async fn update_slides(
        &self,
        slides_url: &str,
        record: &CanonicalRecord,
    ) -> Result<SlideUpdateResponse, RemoteError> {
        let url = format!("{}/update-slides", slides_url.trim_end_matches('/'));
        tracing::debug!(url = %url, "Pushing record to slide service");

        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }
}
