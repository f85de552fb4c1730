//! HTTP route handlers.

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod gallery;
pub mod health;
pub mod lessons;
pub mod livestream;
pub mod media;
pub mod prayer_requests;
pub mod sermons;

use chrono::Utc;
use serde::Deserialize;

use domain::filter::{FilterSpec, MonthWindow};
use persistence::sync::SyncStatus;

/// Common list-filter query parameters.
///
/// `category` and `status` accept the `"all"` sentinel; `month` is a
/// calendar-month offset relative to today (0 = this month, -1 = last).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFilterQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub month: Option<i32>,
}

impl CollectionFilterQuery {
    /// Evaluates the query into a filter spec, anchoring the month window
    /// at today.
    pub fn into_spec(self) -> FilterSpec {
        FilterSpec::new(
            self.search,
            self.category,
            self.status,
            self.month
                .map(|offset| MonthWindow::new(Utc::now().date_naive(), offset)),
        )
    }
}

/// Confirmation gate for destructive calls.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Reports a failed subscription as the visible indicator on list views.
pub fn sync_error(status: &SyncStatus) -> Option<String> {
    match status {
        SyncStatus::Live => None,
        SyncStatus::Failed(reason) => Some(reason.clone()),
    }
}
