//! Sunday School lesson endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::models::lesson::{
    CreateLessonRequest, LessonResponse, ListLessonsResponse, UpdateLessonRequest,
};
use domain::models::Lesson;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{sync_error, CollectionFilterQuery, DeleteQuery};
use crate::services::mutation::{delete_confirmed, EditSession, EntityForm};

/// Create a new lesson.
///
/// POST /api/v1/admin/lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    Json(request): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), ApiError> {
    let mut session = EditSession::create(request);
    let doc = session.submit(state.store.as_ref(), None).await?;
    let lesson: Lesson = doc.decode()?;

    info!(lesson_id = %lesson.id, week = lesson.week, topic = %lesson.topic, "Lesson created");
    Ok((StatusCode::CREATED, Json(lesson.into())))
}

/// List lessons, filtered.
///
/// GET /api/v1/admin/lessons?search=&status=&month=
pub async fn list_lessons(
    State(state): State<AppState>,
    Query(query): Query<CollectionFilterQuery>,
) -> Result<Json<ListLessonsResponse>, ApiError> {
    let sync = &state.collections.lessons;
    let snapshot = sync.current();
    let spec = query.into_spec();

    let lessons: Vec<LessonResponse> = spec
        .apply(snapshot.as_slice())
        .into_iter()
        .cloned()
        .map(LessonResponse::from)
        .collect();

    let total = lessons.len();
    Ok(Json(ListLessonsResponse {
        lessons,
        total,
        sync_error: sync_error(&sync.status()),
    }))
}

/// Get a single lesson.
///
/// GET /api/v1/admin/lessons/:lesson_id
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = state
        .collections
        .lessons
        .find(lesson_id)
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;
    Ok(Json(lesson.into()))
}

/// Update a lesson (partial update).
///
/// PATCH /api/v1/admin/lessons/:lesson_id
pub async fn update_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(request): Json<UpdateLessonRequest>,
) -> Result<Json<LessonResponse>, ApiError> {
    let store = state.store.as_ref();
    if store
        .get_document(<UpdateLessonRequest as EntityForm>::COLLECTION, lesson_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Lesson not found".to_string()));
    }

    let mut session = EditSession::edit(lesson_id, request);
    let doc = session.submit(store, None).await?;
    let lesson: Lesson = doc.decode()?;

    info!(lesson_id = %lesson.id, "Lesson updated");
    Ok(Json(lesson.into()))
}

/// Delete a lesson, behind a confirmation gate.
///
/// DELETE /api/v1/admin/lessons/:lesson_id?confirm=true
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    delete_confirmed(
        state.store.as_ref(),
        <UpdateLessonRequest as EntityForm>::COLLECTION,
        lesson_id,
        query.confirm,
    )
    .await?;

    info!(%lesson_id, "Lesson deleted");
    Ok(StatusCode::NO_CONTENT)
}
