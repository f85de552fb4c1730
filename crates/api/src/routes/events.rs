//! Event endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;

use domain::filter::tally_by;
use domain::models::event::{
    CreateEventRequest, EventResponse, EventStatus, ListEventsResponse, UpdateEventRequest,
};
use domain::models::Event;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::{sync_error, CollectionFilterQuery, DeleteQuery};
use crate::services::mutation::{delete_confirmed, EditSession, EntityForm};

/// Create a new event.
///
/// POST /api/v1/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let mut session = EditSession::create(request);
    let doc = session.submit(state.store.as_ref(), None).await?;
    let event: Event = doc.decode()?;

    info!(event_id = %event.id, title = %event.title, "Event created");
    Ok((StatusCode::CREATED, Json(event.into())))
}

/// List events, filtered.
///
/// GET /api/v1/admin/events?search=&category=&status=&month=
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<CollectionFilterQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let sync = &state.collections.events;
    let snapshot = sync.current();
    let spec = query.into_spec();

    let events: Vec<EventResponse> = spec
        .apply(snapshot.as_slice())
        .into_iter()
        .cloned()
        .map(EventResponse::from)
        .collect();

    let total = events.len();
    Ok(Json(ListEventsResponse {
        events,
        total,
        sync_error: sync_error(&sync.status()),
    }))
}

/// Get a single event.
///
/// GET /api/v1/admin/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let event = state
        .collections
        .events
        .find(event_id)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;
    Ok(Json(event.into()))
}

/// Update an event (partial update).
///
/// PATCH /api/v1/admin/events/:event_id
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let store = state.store.as_ref();
    if store
        .get_document(<CreateEventRequest as EntityForm>::COLLECTION, event_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Event not found".to_string()));
    }

    let mut session = EditSession::edit(event_id, request);
    let doc = session.submit(store, None).await?;
    let event: Event = doc.decode()?;

    info!(event_id = %event.id, "Event updated");
    Ok(Json(event.into()))
}

/// Delete an event, behind a confirmation gate.
///
/// DELETE /api/v1/admin/events/:event_id?confirm=true
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    delete_confirmed(
        state.store.as_ref(),
        <CreateEventRequest as EntityForm>::COLLECTION,
        event_id,
        query.confirm,
    )
    .await?;

    info!(%event_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Derived event statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total: usize,
    pub upcoming: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

/// GET /api/v1/admin/events/stats
pub async fn event_stats(State(state): State<AppState>) -> Result<Json<EventStats>, ApiError> {
    let snapshot = state.collections.events.current();

    let by_status = tally_by(snapshot.as_slice(), |e: &Event| e.status.as_str().to_string());
    let by_category = tally_by(snapshot.as_slice(), |e: &Event| e.category.as_str().to_string());
    let upcoming = snapshot
        .iter()
        .filter(|e| e.status == EventStatus::Upcoming)
        .count();

    Ok(Json(EventStats {
        total: snapshot.len(),
        upcoming,
        by_status,
        by_category,
    }))
}
