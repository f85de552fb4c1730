//! Gallery photo domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::collection::CollectionEntity;
use crate::filter::Filterable;

/// A photo in the `gallery_photos` collection.
///
/// Listings sort on `uploaded_at`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionEntity for GalleryPhoto {
    const COLLECTION: &'static str = "gallery_photos";

    fn id(&self) -> Uuid {
        self.id
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Filterable for GalleryPhoto {
    fn search_fields(&self) -> Vec<&str> {
        self.caption.as_deref().map(|c| vec![c]).unwrap_or_default()
    }
    fn calendar_date(&self) -> Option<NaiveDate> {
        Some(self.uploaded_at.date_naive())
    }
}

/// Request payload for registering an already-hosted photo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryPhotoRequest {
    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub url: String,

    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(default)]
    pub is_featured: bool,
}

/// Request payload for updating a photo's caption or featured flag.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryPhotoRequest {
    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

/// Response payload for gallery operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhotoResponse {
    pub id: Uuid,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub is_featured: bool,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GalleryPhoto> for GalleryPhotoResponse {
    fn from(p: GalleryPhoto) -> Self {
        Self {
            id: p.id,
            url: p.url,
            caption: p.caption,
            is_featured: p.is_featured,
            uploaded_at: p.uploaded_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Response for listing gallery photos.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGalleryPhotosResponse {
    pub photos: Vec<GalleryPhotoResponse>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}
