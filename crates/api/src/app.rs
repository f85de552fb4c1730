use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::models::{Event, GalleryPhoto, Lesson, PrayerRequest, Sermon};
use persistence::store::DocumentStore;
use persistence::sync::{CollectionSynchronizer, SyncStatus};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, require_admin};
use crate::routes::{
    auth, dashboard, events, gallery, health, lessons, livestream, media, prayer_requests, sermons,
};
use crate::services::livestream::{LivestreamClient, StreamHealth};
use crate::services::media::MediaClient;
use crate::services::session::SessionService;

/// Live typed views of every managed collection.
///
/// Opened once at startup; each holds the single subscription channel for
/// its collection for the lifetime of the process.
pub struct Collections {
    pub events: CollectionSynchronizer<Event>,
    pub sermons: CollectionSynchronizer<Sermon>,
    pub prayer_requests: CollectionSynchronizer<PrayerRequest>,
    pub gallery: CollectionSynchronizer<GalleryPhoto>,
    pub lessons: CollectionSynchronizer<Lesson>,
}

impl Collections {
    pub async fn open(store: &dyn DocumentStore) -> Self {
        Self {
            events: CollectionSynchronizer::open(store).await,
            sermons: CollectionSynchronizer::open(store).await,
            prayer_requests: CollectionSynchronizer::open(store).await,
            gallery: CollectionSynchronizer::open(store).await,
            lessons: CollectionSynchronizer::open(store).await,
        }
    }

    /// Names of collections whose subscription is down.
    pub fn degraded(&self) -> Vec<&'static str> {
        let mut degraded = Vec::new();
        if matches!(self.events.status(), SyncStatus::Failed(_)) {
            degraded.push("events");
        }
        if matches!(self.sermons.status(), SyncStatus::Failed(_)) {
            degraded.push("sermons");
        }
        if matches!(self.prayer_requests.status(), SyncStatus::Failed(_)) {
            degraded.push("prayer_requests");
        }
        if matches!(self.gallery.status(), SyncStatus::Failed(_)) {
            degraded.push("gallery_photos");
        }
        if matches!(self.lessons.status(), SyncStatus::Failed(_)) {
            degraded.push("lessons");
        }
        degraded
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub collections: Arc<Collections>,
    pub config: Arc<Config>,
    pub sessions: Arc<SessionService>,
    pub media: Arc<MediaClient>,
    pub livestream: Arc<LivestreamClient>,
    pub stream_health: watch::Receiver<StreamHealth>,
}

/// Builds the application state and hands back the stream-health sender for
/// the status poller job.
pub async fn build_state(
    config: Config,
    store: Arc<dyn DocumentStore>,
) -> (AppState, watch::Sender<StreamHealth>) {
    let collections = Arc::new(Collections::open(store.as_ref()).await);
    let sessions = Arc::new(SessionService::new(&config.session));
    let media = Arc::new(MediaClient::new(config.media.clone()));
    let livestream = Arc::new(LivestreamClient::new(config.livestream.clone()));
    let (health_tx, health_rx) = watch::channel(StreamHealth::default());

    let state = AppState {
        store,
        collections,
        config: Arc::new(config),
        sessions,
        media,
        livestream,
        stream_health: health_rx,
    };

    (state, health_tx)
}

pub fn create_app(state: AppState) -> Router {
    // Build CORS layer based on configuration
    let cors = if state.config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = state
            .config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/auth/login", post(auth::login));

    // Admin routes (require a verified session token)
    let admin_routes = Router::new()
        .route("/api/v1/auth/session", get(auth::current_session))
        // Events
        .route(
            "/api/v1/admin/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/api/v1/admin/events/stats", get(events::event_stats))
        .route(
            "/api/v1/admin/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        // Sermons
        .route(
            "/api/v1/admin/sermons",
            get(sermons::list_sermons).post(sermons::create_sermon),
        )
        .route("/api/v1/admin/sermons/stats", get(sermons::sermon_stats))
        .route(
            "/api/v1/admin/sermons/:sermon_id",
            get(sermons::get_sermon)
                .patch(sermons::update_sermon)
                .delete(sermons::delete_sermon),
        )
        // Prayer requests
        .route(
            "/api/v1/admin/prayer-requests",
            get(prayer_requests::list_prayer_requests).post(prayer_requests::create_prayer_request),
        )
        .route(
            "/api/v1/admin/prayer-requests/:request_id",
            get(prayer_requests::get_prayer_request)
                .patch(prayer_requests::update_prayer_request)
                .delete(prayer_requests::delete_prayer_request),
        )
        .route(
            "/api/v1/admin/prayer-requests/:request_id/status",
            post(prayer_requests::change_status),
        )
        .route(
            "/api/v1/admin/prayer-requests/:request_id/responses",
            post(prayer_requests::add_response),
        )
        // Gallery
        .route(
            "/api/v1/admin/gallery",
            get(gallery::list_photos).post(gallery::create_photo),
        )
        .route("/api/v1/admin/gallery/upload", post(gallery::upload_photo))
        .route(
            "/api/v1/admin/gallery/:photo_id",
            get(gallery::get_photo)
                .patch(gallery::update_photo)
                .delete(gallery::delete_photo),
        )
        // Sunday School lessons
        .route(
            "/api/v1/admin/lessons",
            get(lessons::list_lessons).post(lessons::create_lesson),
        )
        .route(
            "/api/v1/admin/lessons/:lesson_id",
            get(lessons::get_lesson)
                .patch(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        )
        // Media upload
        .route("/api/v1/admin/media", post(media::upload))
        // Livestream control
        .route(
            "/api/v1/admin/livestream/status",
            get(livestream::stream_status),
        )
        .route("/api/v1/admin/livestream/start", post(livestream::start_stream))
        .route("/api/v1/admin/livestream/stop", post(livestream::stop_stream))
        // Dashboard
        .route("/api/v1/admin/dashboard", get(dashboard::overview))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
