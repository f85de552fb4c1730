//! Admin session endpoints.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::session::AdminSession;

/// Login request payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
}

/// Current-session response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub username: String,
}

/// Verify the configured admin credential and issue a session token.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = state.sessions.login(&request.username, &request.password)?;

    Ok(Json(LoginResponse {
        token: session.token,
        expires_in: session.expires_in,
    }))
}

/// The admin identity behind the presented token.
///
/// GET /api/v1/auth/session
pub async fn current_session(
    Extension(session): Extension<AdminSession>,
) -> Json<SessionResponse> {
    Json(SessionResponse {
        username: session.username,
    })
}
