//! Document store abstraction.
//!
//! The remote document database is a black box with per-document writes and
//! push-based collection subscriptions. This trait is the seam between the
//! admin backend and whichever store backs it; `MemoryStore` is the bundled
//! implementation.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::document::Document;

/// The full ordered set of documents in a collection at a point in time.
///
/// Snapshots are replaced atomically on every change, never merged, and are
/// immutable to consumers.
pub type Snapshot = Arc<Vec<Document>>;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    #[error("Subscription failed: {0}")]
    Subscription(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Failed to decode document {id}: {reason}")]
    Decode { id: Uuid, reason: String },
}

/// Per-document operations against one named collection each.
///
/// Timestamps are assigned by the store at write time: `created_at` and
/// `updated_at` on create, `updated_at` on every subsequent write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document with a fresh id; returns the stored document.
    async fn create_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    /// Shallow-merges the given fields over the stored document and bumps
    /// `updated_at`. A `null` value removes the key.
    async fn update_document(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    /// Deletes a document. Deleting an unknown id is a reported error, not
    /// a crash; there is no soft delete.
    async fn delete_document(&self, collection: &str, id: Uuid) -> Result<(), StoreError>;

    /// Fetches a single document.
    async fn get_document(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError>;

    /// Opens a push-based feed of the collection's snapshot. The receiver
    /// always holds the latest snapshot; dropping it closes the channel.
    async fn subscribe_collection(
        &self,
        collection: &str,
    ) -> Result<watch::Receiver<Snapshot>, StoreError>;
}
