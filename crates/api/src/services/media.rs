//! Media upload gateway client.
//!
//! A thin client for the external image/video host: one multipart POST per
//! upload, returning the hosted content URL. Every call re-uploads; nothing
//! is retried or cached.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use shared::crypto::sign_upload_params;

use crate::config::MediaConfig;

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// The hosted result of a successful upload.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMedia {
    pub secure_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

/// Upload response body from the media host.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Error type for media uploads.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Media host is not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media host rejected the upload: {0}")]
    Api(String),

    #[error("Media host response carried no usable URL")]
    MissingUrl,
}

/// Anything that can upload a file and hand back a hosted URL.
///
/// The mutation controller depends on this trait so edit-session tests can
/// run against a stub host.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia, UploadError>;
}

/// Client for the external media host.
pub struct MediaClient {
    client: Client,
    config: MediaConfig,
}

impl MediaClient {
    pub fn new(config: MediaConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled && !self.config.upload_url.is_empty()
    }

    /// Signed-upload parameters for the given timestamp.
    ///
    /// Only used when an API secret is configured; unsigned uploads carry
    /// the preset alone.
    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let params = vec![
            ("timestamp", timestamp.to_string()),
            ("upload_preset", self.config.upload_preset.clone()),
        ];
        let signature = sign_upload_params(&params, &self.config.api_secret);

        let mut all = params;
        all.push(("api_key", self.config.api_key.clone()));
        all.push(("signature", signature));
        all
    }
}

#[async_trait]
impl MediaUploader for MediaClient {
    async fn upload(&self, file: MediaFile) -> Result<UploadedMedia, UploadError> {
        if !self.is_enabled() {
            return Err(UploadError::NotConfigured);
        }

        let part = Part::bytes(file.bytes)
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)?;

        let mut form = Form::new().part("file", part);
        if self.config.api_secret.is_empty() {
            form = form.text("upload_preset", self.config.upload_preset.clone());
        } else {
            for (key, value) in self.signed_params(Utc::now().timestamp()) {
                form = form.text(key, value);
            }
        }

        let response = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body: UploadResponse = response.json().await?;

        if let Some(error) = body.error {
            return Err(UploadError::Api(error.message));
        }
        if !status.is_success() {
            return Err(UploadError::Api(format!("upload returned {}", status)));
        }

        let secure_url = body.secure_url.ok_or(UploadError::MissingUrl)?;
        info!(filename = %file.filename, url = %secure_url, "Media uploaded");

        Ok(UploadedMedia {
            secure_url,
            public_id: body.public_id,
        })
    }
}
