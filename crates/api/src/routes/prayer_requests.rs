//! Prayer request endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::prayer_request::{
    follow_up_on_transition, AddPrayerResponseRequest, ChangePrayerStatusRequest,
    CreatePrayerRequest, ListPrayerRequestsResponse, PrayerRequestResponse, PrayerResponseEntry,
    UpdatePrayerRequest,
};
use domain::models::PrayerRequest;

use crate::app::AppState;
use crate::error::ApiError;
use crate::forms::{PrayerResponsesForm, PrayerStatusForm};
use crate::routes::{sync_error, CollectionFilterQuery, DeleteQuery};
use crate::services::mutation::{delete_confirmed, EditSession, EntityForm};

/// Create a new prayer request.
///
/// POST /api/v1/admin/prayer-requests
pub async fn create_prayer_request(
    State(state): State<AppState>,
    Json(request): Json<CreatePrayerRequest>,
) -> Result<(StatusCode, Json<PrayerRequestResponse>), ApiError> {
    let mut session = EditSession::create(request);
    let doc = session.submit(state.store.as_ref(), None).await?;
    let prayer: PrayerRequest = doc.decode()?;

    info!(request_id = %prayer.id, urgent = prayer.is_urgent, "Prayer request created");
    Ok((StatusCode::CREATED, Json(prayer.into())))
}

/// List prayer requests, filtered.
///
/// GET /api/v1/admin/prayer-requests?search=&category=&status=
pub async fn list_prayer_requests(
    State(state): State<AppState>,
    Query(query): Query<CollectionFilterQuery>,
) -> Result<Json<ListPrayerRequestsResponse>, ApiError> {
    let sync = &state.collections.prayer_requests;
    let snapshot = sync.current();
    let spec = query.into_spec();

    let prayer_requests: Vec<PrayerRequestResponse> = spec
        .apply(snapshot.as_slice())
        .into_iter()
        .cloned()
        .map(PrayerRequestResponse::from)
        .collect();

    let total = prayer_requests.len();
    Ok(Json(ListPrayerRequestsResponse {
        prayer_requests,
        total,
        sync_error: sync_error(&sync.status()),
    }))
}

/// Get a single prayer request.
///
/// GET /api/v1/admin/prayer-requests/:request_id
pub async fn get_prayer_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<PrayerRequestResponse>, ApiError> {
    let prayer = state
        .collections
        .prayer_requests
        .find(request_id)
        .ok_or_else(|| ApiError::NotFound("Prayer request not found".to_string()))?;
    Ok(Json(prayer.into()))
}

/// Update a prayer request (partial update of the contact/message fields).
///
/// PATCH /api/v1/admin/prayer-requests/:request_id
pub async fn update_prayer_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<UpdatePrayerRequest>,
) -> Result<Json<PrayerRequestResponse>, ApiError> {
    let store = state.store.as_ref();
    if store
        .get_document(<UpdatePrayerRequest as EntityForm>::COLLECTION, request_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Prayer request not found".to_string()));
    }

    let mut session = EditSession::edit(request_id, request);
    let doc = session.submit(store, None).await?;
    let prayer: PrayerRequest = doc.decode()?;

    info!(request_id = %prayer.id, "Prayer request updated");
    Ok(Json(prayer.into()))
}

/// Move a request through its workflow.
///
/// Entering `praying` schedules a follow-up 7 days out; every other
/// transition leaves the follow-up date untouched. Any status may move to
/// any other.
///
/// POST /api/v1/admin/prayer-requests/:request_id/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<ChangePrayerStatusRequest>,
) -> Result<Json<PrayerRequestResponse>, ApiError> {
    let store = state.store.as_ref();
    let existing: PrayerRequest = store
        .get_document(<UpdatePrayerRequest as EntityForm>::COLLECTION, request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Prayer request not found".to_string()))?
        .decode()?;

    let changed_at = Utc::now();
    let form = PrayerStatusForm {
        status: request.status,
        follow_up_date: follow_up_on_transition(existing.status, request.status, changed_at),
    };

    let mut session = EditSession::edit(request_id, form);
    let doc = session.submit(store, None).await?;
    let prayer: PrayerRequest = doc.decode()?;

    info!(
        request_id = %prayer.id,
        from = existing.status.as_str(),
        to = prayer.status.as_str(),
        follow_up = ?prayer.follow_up_date,
        "Prayer request status changed"
    );
    Ok(Json(prayer.into()))
}

/// Record a pastoral response against a request.
///
/// POST /api/v1/admin/prayer-requests/:request_id/responses
pub async fn add_response(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<AddPrayerResponseRequest>,
) -> Result<Json<PrayerRequestResponse>, ApiError> {
    request.validate().map_err(ApiError::from)?;

    let store = state.store.as_ref();
    let existing: PrayerRequest = store
        .get_document(<UpdatePrayerRequest as EntityForm>::COLLECTION, request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Prayer request not found".to_string()))?
        .decode()?;

    let mut responses = existing.responses;
    responses.push(PrayerResponseEntry {
        message: request.message,
        responder: request.responder,
        timestamp: Utc::now(),
    });

    let mut session = EditSession::edit(request_id, PrayerResponsesForm { responses });
    let doc = session.submit(store, None).await?;
    let prayer: PrayerRequest = doc.decode()?;

    info!(request_id = %prayer.id, responses = prayer.responses.len(), "Prayer response recorded");
    Ok(Json(prayer.into()))
}

/// Delete a prayer request, behind a confirmation gate.
///
/// DELETE /api/v1/admin/prayer-requests/:request_id?confirm=true
pub async fn delete_prayer_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    delete_confirmed(
        state.store.as_ref(),
        <UpdatePrayerRequest as EntityForm>::COLLECTION,
        request_id,
        query.confirm,
    )
    .await?;

    info!(%request_id, "Prayer request deleted");
    Ok(StatusCode::NO_CONTENT)
}
