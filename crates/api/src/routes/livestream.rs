//! Livestream control endpoints.
//!
//! Thin glue over the external stream control service: the status screen
//! serves the latest polled observation plus the playback URL; start/stop
//! forward directly.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// Status payload for the admin livestream screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStatusResponse {
    pub is_streaming: bool,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_url: Option<String>,
}

/// Outcome payload for start/stop.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamActionResponse {
    pub status: &'static str,
}

fn ensure_enabled(state: &AppState) -> Result<(), ApiError> {
    if state.livestream.is_enabled() {
        Ok(())
    } else {
        Err(ApiError::Configuration(
            "Livestream control service is not configured".to_string(),
        ))
    }
}

/// Latest polled stream status.
///
/// GET /api/v1/admin/livestream/status
pub async fn stream_status(
    State(state): State<AppState>,
) -> Result<Json<StreamStatusResponse>, ApiError> {
    ensure_enabled(&state)?;

    let health = state.stream_health.borrow().clone();
    let playback_url = match state.config.livestream.playback_url.as_str() {
        "" => None,
        url => Some(url.to_string()),
    };

    Ok(Json(StreamStatusResponse {
        is_streaming: health.is_streaming,
        reachable: health.reachable,
        checked_at: health.checked_at,
        playback_url,
    }))
}

/// Start the stream.
///
/// POST /api/v1/admin/livestream/start
pub async fn start_stream(
    State(state): State<AppState>,
) -> Result<Json<StreamActionResponse>, ApiError> {
    state.livestream.start().await?;
    info!("Livestream start requested");
    Ok(Json(StreamActionResponse { status: "started" }))
}

/// Stop the stream.
///
/// POST /api/v1/admin/livestream/stop
pub async fn stop_stream(
    State(state): State<AppState>,
) -> Result<Json<StreamActionResponse>, ApiError> {
    state.livestream.stop().await?;
    info!("Livestream stop requested");
    Ok(Json(StreamActionResponse { status: "stopped" }))
}
