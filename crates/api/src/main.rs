use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use persistence::memory::MemoryStore;
use persistence::store::DocumentStore;

mod app;
mod config;
mod error;
mod forms;
mod jobs;
mod middleware;
mod routes;
mod services;

use jobs::{JobScheduler, StreamStatusJob};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!("Starting Church Manager API v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store and the per-collection subscriptions
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let (state, stream_health_tx) = app::build_state(config.clone(), store).await;

    // Background jobs
    let mut scheduler = JobScheduler::new();
    if state.livestream.is_enabled() {
        scheduler.register(StreamStatusJob::new(
            state.livestream.clone(),
            stream_health_tx,
            state.config.livestream.poll_interval_secs,
        ));
    }
    scheduler.start();

    // Build application
    let router = app::create_app(state);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
