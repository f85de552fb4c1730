//! Livestream status poller.
//!
//! Polls the stream control service on a fixed interval and publishes the
//! latest observation through a watch channel for the admin status screen.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::jobs::scheduler::{Job, JobFrequency};
use crate::services::livestream::{LivestreamClient, StreamHealth};

pub struct StreamStatusJob {
    client: Arc<LivestreamClient>,
    health_tx: watch::Sender<StreamHealth>,
    interval_secs: u64,
}

impl StreamStatusJob {
    pub fn new(
        client: Arc<LivestreamClient>,
        health_tx: watch::Sender<StreamHealth>,
        interval_secs: u64,
    ) -> Self {
        Self {
            client,
            health_tx,
            interval_secs,
        }
    }
}

#[async_trait::async_trait]
impl Job for StreamStatusJob {
    fn name(&self) -> &'static str {
        "stream_status_poll"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs.max(1))
    }

    async fn execute(&self) -> Result<(), String> {
        match self.client.status().await {
            Ok(status) => {
                self.health_tx.send_replace(StreamHealth {
                    is_streaming: status.is_streaming,
                    reachable: true,
                    checked_at: Some(Utc::now()),
                });
                Ok(())
            }
            Err(e) => {
                // A failed poll leaves the previous streaming flag visible
                // but marks the service unreachable.
                let previous = self.health_tx.borrow().is_streaming;
                self.health_tx.send_replace(StreamHealth {
                    is_streaming: previous,
                    reachable: false,
                    checked_at: Some(Utc::now()),
                });
                Err(e.to_string())
            }
        }
    }
}
