//! Sermon domain model.
//!
//! A sermon recording is exactly one of audio or video; the edit form
//! enforces the exclusivity before anything reaches the store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::collection::CollectionEntity;
use crate::filter::Filterable;

/// A sermon as stored in the `sermons` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    pub id: Uuid,
    pub title: String,
    pub speaker: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub series: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub scripture_references: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub audio_url: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub download_count: u64,
    pub status: SermonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionEntity for Sermon {
    const COLLECTION: &'static str = "sermons";

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

impl Filterable for Sermon {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.description.as_str(),
            self.speaker.as_str(),
        ];
        if let Some(series) = &self.series {
            fields.push(series.as_str());
        }
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
    fn category_key(&self) -> Option<&str> {
        Some(&self.category)
    }
    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
    fn calendar_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

/// Sermon publication status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SermonStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl SermonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SermonStatus::Draft => "draft",
            SermonStatus::Published => "published",
            SermonStatus::Archived => "archived",
        }
    }
}

/// Exactly one of audio/video must be set.
///
/// Shared between create validation and the merged-document check on update.
pub fn validate_media_exclusivity(
    audio_url: Option<&str>,
    video_url: Option<&str>,
) -> Result<(), ValidationError> {
    let audio = audio_url.map(str::trim).filter(|s| !s.is_empty());
    let video = video_url.map(str::trim).filter(|s| !s.is_empty());

    match (audio, video) {
        (Some(_), None) | (None, Some(_)) => Ok(()),
        (Some(_), Some(_)) => {
            let mut err = ValidationError::new("media_exclusive");
            err.message = Some("A sermon carries either an audio or a video recording, not both".into());
            Err(err)
        }
        (None, None) => {
            let mut err = ValidationError::new("media_missing");
            err.message = Some("A sermon requires an audio or a video recording".into());
            Err(err)
        }
    }
}

fn validate_create_sermon_media(req: &CreateSermonRequest) -> Result<(), ValidationError> {
    validate_media_exclusivity(req.audio_url.as_deref(), req.video_url.as_deref())
}

/// Request payload for creating a sermon.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_sermon_media", skip_on_field_errors = false))]
pub struct CreateSermonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Speaker must be 1-100 characters"))]
    pub speaker: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    pub date: NaiveDate,

    #[serde(default)]
    pub duration: String,

    #[validate(custom(function = "shared::validation::validate_non_blank_items"))]
    #[serde(default)]
    pub scripture_references: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub view_count: u64,

    #[serde(default)]
    pub download_count: u64,

    #[serde(default)]
    pub status: SermonStatus,
}

/// Request payload for updating a sermon (partial update).
///
/// Setting one recording URL implicitly clears the other; sending both in
/// one request is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSermonRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Speaker must be 1-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[validate(custom(function = "shared::validation::validate_non_blank_items"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripture_references: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SermonStatus>,
}

/// Response payload for sermon operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonResponse {
    pub id: Uuid,
    pub title: String,
    pub speaker: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub date: NaiveDate,
    pub duration: String,
    pub scripture_references: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub is_featured: bool,
    pub view_count: u64,
    pub download_count: u64,
    pub status: SermonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sermon> for SermonResponse {
    fn from(s: Sermon) -> Self {
        Self {
            id: s.id,
            title: s.title,
            speaker: s.speaker,
            description: s.description,
            category: s.category,
            series: s.series,
            date: s.date,
            duration: s.duration,
            scripture_references: s.scripture_references,
            tags: s.tags,
            audio_url: s.audio_url,
            video_url: s.video_url,
            thumbnail_url: s.thumbnail_url,
            is_featured: s.is_featured,
            view_count: s.view_count,
            download_count: s.download_count,
            status: s.status,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Response for listing sermons.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSermonsResponse {
    pub sermons: Vec<SermonResponse>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}

/// Derived sermon statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonStats {
    pub total: usize,
    pub published: usize,
    pub total_views: u64,
    pub total_downloads: u64,
    pub average_views: f64,
    pub series: Vec<String>,
}
