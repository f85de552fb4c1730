//! Event domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::collection::CollectionEntity;
use crate::filter::Filterable;

/// A church event as stored in the `events` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: String,
    pub category: EventCategory,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registration_required: bool,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub status: EventStatus,
    pub featured_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionEntity for Event {
    const COLLECTION: &'static str = "events";

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

impl Filterable for Event {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.location]
    }
    fn category_key(&self) -> Option<&str> {
        Some(self.category.as_str())
    }
    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
    fn calendar_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

/// Event categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Worship,
    Youth,
    Community,
    Outreach,
    Special,
    Ministry,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Worship => "worship",
            EventCategory::Youth => "youth",
            EventCategory::Community => "community",
            EventCategory::Outreach => "outreach",
            EventCategory::Special => "special",
            EventCategory::Ministry => "ministry",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "worship" => Some(EventCategory::Worship),
            "youth" => Some(EventCategory::Youth),
            "community" => Some(EventCategory::Community),
            "outreach" => Some(EventCategory::Outreach),
            "special" => Some(EventCategory::Special),
            "ministry" => Some(EventCategory::Ministry),
            _ => None,
        }
    }
}

/// Event lifecycle status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

/// Request payload for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub date: NaiveDate,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default)]
    pub location: String,

    pub category: EventCategory,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(default)]
    pub registration_required: bool,

    #[validate(email(message = "Contact email is not a valid address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    #[serde(default)]
    pub status: EventStatus,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub featured_image: String,
}

/// Request payload for updating an event (partial update).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[validate(custom(function = "shared::validation::validate_time_of_day"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_required: Option<bool>,

    #[validate(email(message = "Contact email is not a valid address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,

    #[validate(custom(function = "shared::validation::validate_http_url"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

/// Response payload for event operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: String,
    pub category: EventCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub registration_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub status: EventStatus,
    pub featured_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            date: e.date,
            time: e.time,
            end_time: e.end_time,
            location: e.location,
            category: e.category,
            capacity: e.capacity,
            registration_required: e.registration_required,
            contact_email: e.contact_email,
            contact_phone: e.contact_phone,
            status: e.status,
            featured_image: e.featured_image,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Response for listing events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events: Vec<EventResponse>,
    pub total: usize,
    /// Set when the backing subscription is down and the list is degraded
    /// to an empty/stale snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_category_round_trip() {
        for category in [
            EventCategory::Worship,
            EventCategory::Youth,
            EventCategory::Community,
            EventCategory::Outreach,
            EventCategory::Special,
            EventCategory::Ministry,
        ] {
            assert_eq!(EventCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(EventCategory::parse("picnic"), None);
    }

    #[test]
    fn test_event_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EventStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
        assert_eq!(
            serde_json::to_string(&EventStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_create_event_request_defaults() {
        let json = r#"{
            "title": "Easter Sunday Service",
            "date": "2026-04-05",
            "category": "worship",
            "featuredImage": "https://cdn.example.com/easter.jpg"
        }"#;

        let request: CreateEventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title, "Easter Sunday Service");
        assert_eq!(request.status, EventStatus::Upcoming);
        assert!(!request.registration_required);
        assert!(request.capacity.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_event_request_rejects_bad_image_url() {
        let json = r#"{
            "title": "Potluck",
            "date": "2026-05-01",
            "category": "community",
            "featuredImage": "potluck.jpg"
        }"#;

        let request: CreateEventRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_event_request_rejects_bad_time() {
        let json = r#"{
            "title": "Morning Prayer",
            "date": "2026-05-01",
            "time": "7am",
            "category": "worship",
            "featuredImage": "https://cdn.example.com/prayer.jpg"
        }"#;

        let request: CreateEventRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_event_request_rejects_unknown_category() {
        let json = r#"{
            "title": "Bake Sale",
            "date": "2026-05-01",
            "category": "fundraiser",
            "featuredImage": "https://cdn.example.com/bake.jpg"
        }"#;

        assert!(serde_json::from_str::<CreateEventRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_serializes_only_present_fields() {
        let request = UpdateEventRequest {
            title: None,
            description: None,
            date: None,
            time: None,
            end_time: None,
            location: None,
            category: None,
            capacity: Some(120),
            registration_required: None,
            contact_email: None,
            contact_phone: None,
            status: Some(EventStatus::Completed),
            featured_image: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["capacity"], 120);
        assert_eq!(obj["status"], "completed");
    }

    #[test]
    fn test_event_search_fields() {
        let event = Event {
            id: Uuid::new_v4(),
            title: "Harvest Festival".to_string(),
            description: "Community outreach on the green".to_string(),
            date: "2026-10-03".parse().unwrap(),
            time: None,
            end_time: None,
            location: "Church Green".to_string(),
            category: EventCategory::Outreach,
            capacity: None,
            registration_required: false,
            contact_email: None,
            contact_phone: None,
            status: EventStatus::Upcoming,
            featured_image: "https://cdn.example.com/harvest.jpg".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(event.search_fields().len(), 3);
        assert_eq!(event.category_key(), Some("outreach"));
        assert_eq!(event.status_key(), Some("upcoming"));
    }
}
