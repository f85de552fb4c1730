//! Prayer request domain model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::collection::CollectionEntity;
use crate::filter::Filterable;

/// Days until the pastoral follow-up when a request enters `praying`.
pub const FOLLOW_UP_DAYS: i64 = 7;

/// A prayer request as stored in the `prayer_requests` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub category: PrayerCategory,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_confidential: bool,
    pub status: PrayerStatus,
    #[serde(default)]
    pub responses: Vec<PrayerResponseEntry>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionEntity for PrayerRequest {
    const COLLECTION: &'static str = "prayer_requests";

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

impl Filterable for PrayerRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.subject, &self.message]
    }
    fn category_key(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Prayer request categories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrayerCategory {
    #[default]
    General,
    Healing,
    Family,
    Guidance,
    Thanksgiving,
    Other,
}

impl PrayerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerCategory::General => "general",
            PrayerCategory::Healing => "healing",
            PrayerCategory::Family => "family",
            PrayerCategory::Guidance => "guidance",
            PrayerCategory::Thanksgiving => "thanksgiving",
            PrayerCategory::Other => "other",
        }
    }
}

/// Prayer request workflow status.
///
/// Any status may move to any other; the workflow is intentionally
/// unconstrained so admins can reopen or correct requests freely.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrayerStatus {
    #[default]
    New,
    Praying,
    Answered,
    Closed,
}

impl PrayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::New => "new",
            PrayerStatus::Praying => "praying",
            PrayerStatus::Answered => "answered",
            PrayerStatus::Closed => "closed",
        }
    }
}

/// One pastoral response recorded against a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerResponseEntry {
    pub message: String,
    pub responder: String,
    pub timestamp: DateTime<Utc>,
}

/// Follow-up date implied by a status transition.
///
/// Entering `praying` schedules a follow-up exactly [`FOLLOW_UP_DAYS`] after
/// the change; every other transition leaves the follow-up date untouched
/// (`None` here means "no change").
pub fn follow_up_on_transition(
    from: PrayerStatus,
    to: PrayerStatus,
    at: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if from != to && to == PrayerStatus::Praying {
        Some(at + Duration::days(FOLLOW_UP_DAYS))
    } else {
        None
    }
}

/// Request payload for creating a prayer request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrayerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default)]
    pub category: PrayerCategory,

    #[serde(default)]
    pub subject: String,

    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,

    #[serde(default)]
    pub is_urgent: bool,

    #[serde(default)]
    pub is_confidential: bool,

    #[serde(default)]
    pub status: PrayerStatus,
}

/// Request payload for updating a prayer request (partial update).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrayerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(email(message = "Email is not a valid address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PrayerCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_confidential: Option<bool>,
}

/// Request payload for a status change.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePrayerStatusRequest {
    pub status: PrayerStatus,
}

/// Request payload for recording a pastoral response.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddPrayerResponseRequest {
    #[validate(length(min = 1, max = 4000, message = "Response must be 1-4000 characters"))]
    pub message: String,

    #[validate(length(min = 1, max = 100, message = "Responder must be 1-100 characters"))]
    pub responder: String,
}

/// Response payload for prayer request operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequestResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub category: PrayerCategory,
    pub subject: String,
    pub message: String,
    pub is_urgent: bool,
    pub is_confidential: bool,
    pub status: PrayerStatus,
    pub responses: Vec<PrayerResponseEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PrayerRequest> for PrayerRequestResponse {
    fn from(p: PrayerRequest) -> Self {
        Self {
            id: p.id,
            name: p.name,
            email: p.email,
            phone: p.phone,
            category: p.category,
            subject: p.subject,
            message: p.message,
            is_urgent: p.is_urgent,
            is_confidential: p.is_confidential,
            status: p.status,
            responses: p.responses,
            follow_up_date: p.follow_up_date,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Response for listing prayer requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPrayerRequestsResponse {
    pub prayer_requests: Vec<PrayerRequestResponse>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}
