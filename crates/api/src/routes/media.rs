//! Standalone media upload endpoint.
//!
//! Used by the event and sermon edit screens to host an image first and
//! submit the returned URL with the entity form.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::media::{MediaFile, MediaUploader, UploadedMedia};

/// Upload one file to the media host.
///
/// POST /api/v1/admin/media (multipart, field `file`)
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedMedia>), ApiError> {
    let mut file: Option<MediaFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read file: {}", e)))?;
            file = Some(MediaFile {
                bytes: bytes.to_vec(),
                filename,
                content_type,
            });
        }
    }

    let file = file.ok_or_else(|| ApiError::Validation("A file is required".to_string()))?;
    let filename = file.filename.clone();

    let uploaded = state.media.upload(file).await?;
    info!(%filename, url = %uploaded.secure_url, "Standalone media upload");

    Ok((StatusCode::CREATED, Json(uploaded)))
}
