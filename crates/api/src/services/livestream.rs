//! Livestream control service client.
//!
//! Pure glue: start, stop and a status probe against the external stream
//! control service. No protocol or stream-processing logic lives here;
//! playback happens in the client player via the configured playlist URL.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::LivestreamConfig;

/// Status payload reported by the control service.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StreamStatus {
    pub is_streaming: bool,
}

/// Latest polled observation of the stream, as served to the admin screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamHealth {
    pub is_streaming: bool,
    /// False when the last poll could not reach the control service.
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl Default for StreamHealth {
    fn default() -> Self {
        Self {
            is_streaming: false,
            reachable: false,
            checked_at: None,
        }
    }
}

/// Error type for stream control calls.
#[derive(Debug, thiserror::Error)]
pub enum LivestreamError {
    #[error("Livestream control service is not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Control service returned {0}")]
    Api(String),
}

/// Client for the stream control service.
pub struct LivestreamClient {
    client: Client,
    config: LivestreamConfig,
}

impl LivestreamClient {
    pub fn new(config: LivestreamConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.base_url.is_empty()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn ensure_configured(&self) -> Result<(), LivestreamError> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(LivestreamError::NotConfigured)
        }
    }

    /// GET /status
    pub async fn status(&self) -> Result<StreamStatus, LivestreamError> {
        self.ensure_configured()?;

        let response = self.client.get(self.endpoint("status")).send().await?;
        if !response.status().is_success() {
            return Err(LivestreamError::Api(response.status().to_string()));
        }
        Ok(response.json().await?)
    }

    /// POST /start-stream
    pub async fn start(&self) -> Result<(), LivestreamError> {
        self.post("start-stream").await
    }

    /// POST /stop-stream
    pub async fn stop(&self) -> Result<(), LivestreamError> {
        self.post("stop-stream").await
    }

    async fn post(&self, path: &str) -> Result<(), LivestreamError> {
        self.ensure_configured()?;

        let response = self.client.post(self.endpoint(path)).send().await?;
        if !response.status().is_success() {
            return Err(LivestreamError::Api(response.status().to_string()));
        }
        Ok(())
    }
}
