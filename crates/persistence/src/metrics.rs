//! Store metrics collection.

use metrics::{gauge, histogram};
use std::time::Instant;

/// Records the duration of one store operation.
pub fn record_op_duration(op: &str, collection: &str, duration_secs: f64) {
    histogram!(
        "store_op_duration_seconds",
        "op" => op.to_string(),
        "collection" => collection.to_string()
    )
    .record(duration_secs);
}

/// Records the document count of a collection snapshot.
pub fn record_collection_size(collection: &str, size: usize) {
    gauge!(
        "store_collection_documents",
        "collection" => collection.to_string()
    )
    .set(size as f64);
}

/// Times one store operation and records its duration.
pub struct OpTimer {
    op: &'static str,
    collection: String,
    start: Instant,
}

impl OpTimer {
    pub fn new(op: &'static str, collection: impl Into<String>) -> Self {
        Self {
            op,
            collection: collection.into(),
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_op_duration(self.op, &self.collection, duration);
    }
}
