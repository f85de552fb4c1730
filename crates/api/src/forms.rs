//! Bindings between the domain edit-form payloads and the mutation
//! controller, plus the handful of controller-only forms that have no
//! public request type of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::collection::CollectionEntity;
use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use domain::models::gallery_photo::{GalleryPhoto, UpdateGalleryPhotoRequest};
use domain::models::lesson::{CreateLessonRequest, Lesson, UpdateLessonRequest};
use domain::models::prayer_request::{
    CreatePrayerRequest, PrayerRequest, PrayerResponseEntry, PrayerStatus, UpdatePrayerRequest,
};
use domain::models::sermon::{CreateSermonRequest, Sermon, UpdateSermonRequest};
use domain::models::Event;

use crate::services::mutation::EntityForm;

impl EntityForm for CreateEventRequest {
    const COLLECTION: &'static str = <Event as CollectionEntity>::COLLECTION;

    fn attach_media_url(&mut self, url: String) {
        self.featured_image = url;
    }
}

impl EntityForm for UpdateEventRequest {
    const COLLECTION: &'static str = <Event as CollectionEntity>::COLLECTION;

    fn attach_media_url(&mut self, url: String) {
        self.featured_image = Some(url);
    }
}

impl EntityForm for CreateSermonRequest {
    const COLLECTION: &'static str = <Sermon as CollectionEntity>::COLLECTION;

    fn attach_media_url(&mut self, url: String) {
        self.thumbnail_url = Some(url);
    }
}

impl EntityForm for UpdateSermonRequest {
    const COLLECTION: &'static str = <Sermon as CollectionEntity>::COLLECTION;

    fn attach_media_url(&mut self, url: String) {
        self.thumbnail_url = Some(url);
    }
}

impl EntityForm for CreatePrayerRequest {
    const COLLECTION: &'static str = <PrayerRequest as CollectionEntity>::COLLECTION;
}

impl EntityForm for UpdatePrayerRequest {
    const COLLECTION: &'static str = <PrayerRequest as CollectionEntity>::COLLECTION;
}

impl EntityForm for UpdateGalleryPhotoRequest {
    const COLLECTION: &'static str = <GalleryPhoto as CollectionEntity>::COLLECTION;
}

impl EntityForm for CreateLessonRequest {
    const COLLECTION: &'static str = <Lesson as CollectionEntity>::COLLECTION;
}

impl EntityForm for UpdateLessonRequest {
    const COLLECTION: &'static str = <Lesson as CollectionEntity>::COLLECTION;
}

/// Create form for gallery photos.
///
/// Unlike the other collections the photo's `uploadedAt` sort key is fixed
/// at form construction, so the stored document carries it from the start.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhotoForm {
    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub url: String,

    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    pub is_featured: bool,

    pub uploaded_at: DateTime<Utc>,
}

impl GalleryPhotoForm {
    pub fn new(url: String, caption: Option<String>, is_featured: bool) -> Self {
        Self {
            url,
            caption,
            is_featured,
            uploaded_at: Utc::now(),
        }
    }
}

impl EntityForm for GalleryPhotoForm {
    const COLLECTION: &'static str = <GalleryPhoto as CollectionEntity>::COLLECTION;

    fn attach_media_url(&mut self, url: String) {
        self.url = url;
    }
}

/// Controller form for a prayer request status change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrayerStatusForm {
    pub status: PrayerStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<DateTime<Utc>>,
}

impl EntityForm for PrayerStatusForm {
    const COLLECTION: &'static str = <PrayerRequest as CollectionEntity>::COLLECTION;
}

/// Controller form replacing a request's response list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrayerResponsesForm {
    pub responses: Vec<PrayerResponseEntry>,
}

impl EntityForm for PrayerResponsesForm {
    const COLLECTION: &'static str = <PrayerRequest as CollectionEntity>::COLLECTION;
}
