//! Sermon endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use domain::filter::{average_by, distinct_values, sum_by};
use domain::models::sermon::{
    validate_media_exclusivity, CreateSermonRequest, ListSermonsResponse, SermonResponse,
    SermonStats, SermonStatus, UpdateSermonRequest,
};
use domain::models::Sermon;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{sync_error, CollectionFilterQuery, DeleteQuery};
use crate::services::mutation::{delete_confirmed, EditSession, EntityForm};

/// Create a new sermon.
///
/// POST /api/v1/admin/sermons
pub async fn create_sermon(
    State(state): State<AppState>,
    Json(request): Json<CreateSermonRequest>,
) -> Result<(StatusCode, Json<SermonResponse>), ApiError> {
    let mut session = EditSession::create(request);
    let doc = session.submit(state.store.as_ref(), None).await?;
    let sermon: Sermon = doc.decode()?;

    info!(sermon_id = %sermon.id, title = %sermon.title, speaker = %sermon.speaker, "Sermon created");
    Ok((StatusCode::CREATED, Json(sermon.into())))
}

/// List sermons, filtered.
///
/// GET /api/v1/admin/sermons?search=&category=&status=&month=
pub async fn list_sermons(
    State(state): State<AppState>,
    Query(query): Query<CollectionFilterQuery>,
) -> Result<Json<ListSermonsResponse>, ApiError> {
    let sync = &state.collections.sermons;
    let snapshot = sync.current();
    let spec = query.into_spec();

    let sermons: Vec<SermonResponse> = spec
        .apply(snapshot.as_slice())
        .into_iter()
        .cloned()
        .map(SermonResponse::from)
        .collect();

    let total = sermons.len();
    Ok(Json(ListSermonsResponse {
        sermons,
        total,
        sync_error: sync_error(&sync.status()),
    }))
}

/// Get a single sermon.
///
/// GET /api/v1/admin/sermons/:sermon_id
pub async fn get_sermon(
    State(state): State<AppState>,
    Path(sermon_id): Path<Uuid>,
) -> Result<Json<SermonResponse>, ApiError> {
    let sermon = state
        .collections
        .sermons
        .find(sermon_id)
        .ok_or_else(|| ApiError::NotFound("Sermon not found".to_string()))?;
    Ok(Json(sermon.into()))
}

/// Update a sermon (partial update).
///
/// Setting one recording URL clears the other; the merged document must
/// still satisfy the one-recording invariant, and view/download counters
/// never decrease.
///
/// PATCH /api/v1/admin/sermons/:sermon_id
pub async fn update_sermon(
    State(state): State<AppState>,
    Path(sermon_id): Path<Uuid>,
    Json(request): Json<UpdateSermonRequest>,
) -> Result<Json<SermonResponse>, ApiError> {
    let store = state.store.as_ref();
    let existing: Sermon = store
        .get_document(<UpdateSermonRequest as EntityForm>::COLLECTION, sermon_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Sermon not found".to_string()))?
        .decode()?;

    if request.audio_url.is_some() && request.video_url.is_some() {
        return Err(ApiError::Validation(
            "A sermon carries either an audio or a video recording, not both".to_string(),
        ));
    }

    if let Some(view_count) = request.view_count {
        if view_count < existing.view_count {
            return Err(ApiError::Validation("View count cannot decrease".to_string()));
        }
    }
    if let Some(download_count) = request.download_count {
        if download_count < existing.download_count {
            return Err(ApiError::Validation(
                "Download count cannot decrease".to_string(),
            ));
        }
    }

    // Effective recording URLs after the merge.
    let merged_audio = request
        .audio_url
        .clone()
        .or_else(|| existing.audio_url.clone().filter(|_| request.video_url.is_none()));
    let merged_video = request
        .video_url
        .clone()
        .or_else(|| existing.video_url.clone().filter(|_| request.audio_url.is_none()));
    validate_media_exclusivity(merged_audio.as_deref(), merged_video.as_deref())
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let mut session = EditSession::edit(sermon_id, request.clone());
    if request.audio_url.is_some() {
        session.clear_field("videoUrl");
    }
    if request.video_url.is_some() {
        session.clear_field("audioUrl");
    }

    let doc = session.submit(store, None).await?;
    let sermon: Sermon = doc.decode()?;

    info!(sermon_id = %sermon.id, "Sermon updated");
    Ok(Json(sermon.into()))
}

/// Delete a sermon, behind a confirmation gate.
///
/// DELETE /api/v1/admin/sermons/:sermon_id?confirm=true
pub async fn delete_sermon(
    State(state): State<AppState>,
    Path(sermon_id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    delete_confirmed(
        state.store.as_ref(),
        <UpdateSermonRequest as EntityForm>::COLLECTION,
        sermon_id,
        query.confirm,
    )
    .await?;

    info!(%sermon_id, "Sermon deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Derived sermon statistics.
///
/// GET /api/v1/admin/sermons/stats
pub async fn sermon_stats(State(state): State<AppState>) -> Result<Json<SermonStats>, ApiError> {
    let snapshot = state.collections.sermons.current();

    Ok(Json(SermonStats {
        total: snapshot.len(),
        published: snapshot
            .iter()
            .filter(|s| s.status == SermonStatus::Published)
            .count(),
        total_views: sum_by(snapshot.as_slice(), |s: &Sermon| s.view_count),
        total_downloads: sum_by(snapshot.as_slice(), |s: &Sermon| s.download_count),
        average_views: average_by(snapshot.as_slice(), |s: &Sermon| s.view_count as f64),
        series: distinct_values(snapshot.as_slice(), |s: &Sermon| s.series.clone()),
    }))
}
