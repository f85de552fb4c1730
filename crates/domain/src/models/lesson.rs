//! Sunday School lesson domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::collection::CollectionEntity;
use crate::filter::Filterable;

/// A Sunday School lesson in the `lessons` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub week: u32,
    pub date: NaiveDate,
    pub topic: String,
    #[serde(default)]
    pub memory_verse: String,
    #[serde(default)]
    pub verse_reference: String,
    #[serde(default)]
    pub main_content: String,
    #[serde(default)]
    pub bible_references: Vec<String>,
    #[serde(default)]
    pub discussion_questions: Vec<String>,
    #[serde(default)]
    pub teacher: String,
    pub status: LessonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CollectionEntity for Lesson {
    const COLLECTION: &'static str = "lessons";

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

impl Filterable for Lesson {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.topic,
            &self.memory_verse,
            &self.main_content,
            &self.teacher,
        ]
    }
    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
    fn calendar_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

/// Lesson publication status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    #[default]
    Draft,
    Published,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Draft => "draft",
            LessonStatus::Published => "published",
        }
    }
}

/// Request payload for creating a lesson.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    #[validate(range(min = 1, message = "Week must be a positive number"))]
    pub week: u32,

    pub date: NaiveDate,

    #[validate(length(min = 1, max = 200, message = "Topic must be 1-200 characters"))]
    pub topic: String,

    #[serde(default)]
    pub memory_verse: String,

    #[serde(default)]
    pub verse_reference: String,

    #[serde(default)]
    pub main_content: String,

    #[validate(custom(function = "shared::validation::validate_non_blank_items"))]
    #[serde(default)]
    pub bible_references: Vec<String>,

    #[validate(custom(function = "shared::validation::validate_non_blank_items"))]
    #[serde(default)]
    pub discussion_questions: Vec<String>,

    #[serde(default)]
    pub teacher: String,

    #[serde(default)]
    pub status: LessonStatus,
}

/// Request payload for updating a lesson (partial update).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonRequest {
    #[validate(range(min = 1, message = "Week must be a positive number"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 200, message = "Topic must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_verse: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verse_reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_content: Option<String>,

    #[validate(custom(function = "shared::validation::validate_non_blank_items"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bible_references: Option<Vec<String>>,

    #[validate(custom(function = "shared::validation::validate_non_blank_items"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_questions: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LessonStatus>,
}

/// Response payload for lesson operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: Uuid,
    pub week: u32,
    pub date: NaiveDate,
    pub topic: String,
    pub memory_verse: String,
    pub verse_reference: String,
    pub main_content: String,
    pub bible_references: Vec<String>,
    pub discussion_questions: Vec<String>,
    pub teacher: String,
    pub status: LessonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lesson> for LessonResponse {
    fn from(l: Lesson) -> Self {
        Self {
            id: l.id,
            week: l.week,
            date: l.date,
            topic: l.topic,
            memory_verse: l.memory_verse,
            verse_reference: l.verse_reference,
            main_content: l.main_content,
            bible_references: l.bible_references,
            discussion_questions: l.discussion_questions,
            teacher: l.teacher,
            status: l.status,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Response for listing lessons.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLessonsResponse {
    pub lessons: Vec<LessonResponse>,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_error: Option<String>,
}
