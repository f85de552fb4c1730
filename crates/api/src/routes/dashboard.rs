//! Admin dashboard: cross-collection tallies.
//!
//! Every number is recomputed from the live snapshots at request time;
//! there are no cached running totals to drift.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use domain::filter::{average_by, sum_by, tally_by};
use domain::models::prayer_request::PrayerStatus;
use domain::models::sermon::SermonStatus;
use domain::models::{Event, PrayerRequest, Sermon};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub events: EventMetrics,
    pub sermons: SermonMetrics,
    pub prayer_requests: PrayerMetrics,
    pub gallery_photos: usize,
    pub lessons: usize,
    /// Collections whose subscription is currently down.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded_collections: Vec<&'static str>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetrics {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonMetrics {
    pub total: usize,
    pub published: usize,
    pub total_views: u64,
    pub average_views: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerMetrics {
    pub total: usize,
    pub new: usize,
    pub urgent: usize,
    pub by_status: BTreeMap<String, usize>,
}

/// GET /api/v1/admin/dashboard
pub async fn overview(State(state): State<AppState>) -> Result<Json<DashboardResponse>, ApiError> {
    let events = state.collections.events.current();
    let sermons = state.collections.sermons.current();
    let prayers = state.collections.prayer_requests.current();
    let gallery = state.collections.gallery.current();
    let lessons = state.collections.lessons.current();

    Ok(Json(DashboardResponse {
        events: EventMetrics {
            total: events.len(),
            by_status: tally_by(events.as_slice(), |e: &Event| e.status.as_str().to_string()),
        },
        sermons: SermonMetrics {
            total: sermons.len(),
            published: sermons
                .iter()
                .filter(|s| s.status == SermonStatus::Published)
                .count(),
            total_views: sum_by(sermons.as_slice(), |s: &Sermon| s.view_count),
            average_views: average_by(sermons.as_slice(), |s: &Sermon| s.view_count as f64),
        },
        prayer_requests: PrayerMetrics {
            total: prayers.len(),
            new: prayers
                .iter()
                .filter(|p| p.status == PrayerStatus::New)
                .count(),
            urgent: prayers.iter().filter(|p| p.is_urgent).count(),
            by_status: tally_by(prayers.as_slice(), |p: &PrayerRequest| p.status.as_str().to_string()),
        },
        gallery_photos: gallery.len(),
        lessons: lessons.len(),
        degraded_collections: state.collections.degraded(),
        generated_at: Utc::now(),
    }))
}
