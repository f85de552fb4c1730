use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use persistence::store::StoreError;

use crate::services::livestream::LivestreamError;
use crate::services::media::UploadError;
use crate::services::mutation::MutationError;
use crate::services::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Subscription error: {0}")]
    Subscription(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Upload(msg) => (StatusCode::BAD_GATEWAY, "upload_error", msg.clone()),
            ApiError::Write(msg) => {
                tracing::error!("Store write failed: {}", msg);
                (StatusCode::BAD_GATEWAY, "write_error", msg.clone())
            }
            ApiError::Subscription(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "subscription_error", msg.clone())
            }
            ApiError::Configuration(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "configuration_error",
                msg.clone(),
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.to_string()).unwrap_or_default()
                    )
                })
            })
            .collect();

        ApiError::Validation(messages.join(", "))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("Document {} not found", id)),
            StoreError::Subscription(msg) => ApiError::Subscription(msg),
            other => ApiError::Write(other.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotConfigured => {
                ApiError::Configuration("Media host is not configured".into())
            }
            other => ApiError::Upload(other.to_string()),
        }
    }
}

impl From<LivestreamError> for ApiError {
    fn from(err: LivestreamError) -> Self {
        match err {
            LivestreamError::NotConfigured => {
                ApiError::Configuration("Livestream control service is not configured".into())
            }
            other => ApiError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl From<MutationError> for ApiError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation(errors) => errors.into(),
            MutationError::Invalid(msg) => ApiError::Validation(msg),
            MutationError::NotConfirmed => {
                ApiError::Validation("Deletion requires confirmation".into())
            }
            MutationError::Upload(e) => e.into(),
            MutationError::Configuration(msg) => ApiError::Configuration(msg),
            MutationError::Write(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                ApiError::Unauthorized("no".into()).into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::NotFound("gone".into()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Validation("bad".into()).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Upload("host down".into()).into_response().status(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::Subscription("offline".into())
                    .into_response()
                    .status(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Configuration("missing url".into())
                    .into_response()
                    .status(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::Internal("boom".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (actual, expected) in cases {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound(Uuid::new_v4()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_delete_without_confirmation_is_validation_error() {
        let err: ApiError = MutationError::NotConfirmed.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unconfigured_upload_maps_to_configuration_error() {
        let err: ApiError = UploadError::NotConfigured.into();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", ApiError::Validation("test".to_string())),
            "Validation error: test"
        );
        assert_eq!(
            format!("{}", ApiError::Configuration("test".to_string())),
            "Configuration error: test"
        );
    }
}
