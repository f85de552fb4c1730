//! In-memory document store.
//!
//! The bundled `DocumentStore` backend: per-collection document vectors in
//! creation order, with one watch channel per collection pushing the full
//! snapshot on every mutation. Used for development and the hermetic test
//! suite; a hosted document database client plugs in behind the same trait.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::watch;
use uuid::Uuid;

use crate::document::Document;
use crate::metrics::{record_collection_size, OpTimer};
use crate::store::{DocumentStore, Snapshot, StoreError};

struct CollectionState {
    docs: Vec<Document>,
    tx: watch::Sender<Snapshot>,
}

impl CollectionState {
    fn new() -> Self {
        let (tx, _rx) = watch::channel::<Snapshot>(Arc::new(Vec::new()));
        Self { docs: Vec::new(), tx }
    }

    /// Atomically replaces the published snapshot with the current docs.
    fn publish(&self, collection: &str) {
        let snapshot: Snapshot = Arc::new(self.docs.clone());
        record_collection_size(collection, snapshot.len());
        self.tx.send_replace(snapshot);
    }
}

/// In-memory store with push-based snapshot subscriptions.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, CollectionState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_collection<R>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut CollectionState) -> R,
    ) -> R {
        let mut collections = self.collections.write().unwrap();
        let state = collections
            .entry(collection.to_string())
            .or_insert_with(CollectionState::new);
        f(state)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let timer = OpTimer::new("create", collection);
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        };

        self.with_collection(collection, |state| {
            state.docs.push(doc.clone());
            state.publish(collection);
        });

        timer.record();
        Ok(doc)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let timer = OpTimer::new("update", collection);
        let result = self.with_collection(collection, |state| {
            let doc = state
                .docs
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or(StoreError::NotFound(id))?;

            for (key, value) in fields {
                if value.is_null() {
                    doc.fields.remove(&key);
                } else {
                    doc.fields.insert(key, value);
                }
            }
            // updated_at never moves backwards past created_at.
            doc.updated_at = Utc::now().max(doc.created_at);
            let updated = doc.clone();

            state.publish(collection);
            Ok(updated)
        });

        timer.record();
        result
    }

    async fn delete_document(&self, collection: &str, id: Uuid) -> Result<(), StoreError> {
        let timer = OpTimer::new("delete", collection);
        let result = self.with_collection(collection, |state| {
            let before = state.docs.len();
            state.docs.retain(|d| d.id != id);
            if state.docs.len() == before {
                return Err(StoreError::NotFound(id));
            }
            state.publish(collection);
            Ok(())
        });

        timer.record();
        result
    }

    async fn get_document(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|state| state.docs.iter().find(|d| d.id == id).cloned()))
    }

    async fn subscribe_collection(
        &self,
        collection: &str,
    ) -> Result<watch::Receiver<Snapshot>, StoreError> {
        Ok(self.with_collection(collection, |state| state.tx.subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let doc = store
            .create_document("events", fields(json!({"title": "Picnic"})))
            .await
            .unwrap();

        assert_eq!(doc.created_at, doc.updated_at);
        let fetched = store.get_document("events", doc.id).await.unwrap().unwrap();
        assert_eq!(fetched.fields["title"], "Picnic");
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_updated_at() {
        let store = MemoryStore::new();
        let doc = store
            .create_document("events", fields(json!({"title": "Picnic", "location": "Green"})))
            .await
            .unwrap();

        let updated = store
            .update_document("events", doc.id, fields(json!({"title": "Parish Picnic"})))
            .await
            .unwrap();

        assert_eq!(updated.fields["title"], "Parish Picnic");
        assert_eq!(updated.fields["location"], "Green");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_null_removes_key() {
        let store = MemoryStore::new();
        let doc = store
            .create_document("sermons", fields(json!({"audioUrl": "https://a/s.mp3"})))
            .await
            .unwrap();

        let updated = store
            .update_document(
                "sermons",
                doc.id,
                fields(json!({"audioUrl": null, "videoUrl": "https://a/s.mp4"})),
            )
            .await
            .unwrap();

        assert!(updated.fields.get("audioUrl").is_none());
        assert_eq!(updated.fields["videoUrl"], "https://a/s.mp4");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_document("events", Uuid::new_v4(), Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_repeat_delete_is_reported_error() {
        let store = MemoryStore::new();
        let doc = store
            .create_document("gallery_photos", fields(json!({"url": "https://a/p.jpg"})))
            .await
            .unwrap();

        store.delete_document("gallery_photos", doc.id).await.unwrap();
        let err = store
            .delete_document("gallery_photos", doc.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == doc.id));
    }

    #[tokio::test]
    async fn test_subscription_sees_replaced_snapshots_in_order() {
        let store = MemoryStore::new();
        let rx = store.subscribe_collection("events").await.unwrap();
        assert!(rx.borrow().is_empty());

        let first = store
            .create_document("events", fields(json!({"title": "A"})))
            .await
            .unwrap();
        store
            .create_document("events", fields(json!({"title": "B"})))
            .await
            .unwrap();

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.len(), 2);
        // Creation order is preserved.
        assert_eq!(snapshot[0].id, first.id);

        store.delete_document("events", first.id).await.unwrap();
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].fields["title"], "B");
    }
}
