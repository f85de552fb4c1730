//! Typed collection synchronizer.
//!
//! Bridges the store's raw document snapshots to typed entity snapshots.
//! One synchronizer owns exactly one subscription for its view lifetime;
//! dropping (or `close`-ing) it releases the channel. Consumers receive the
//! snapshot as `Arc<Vec<T>>` and must treat it as immutable.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::warn;

use domain::collection::CollectionEntity;

use crate::store::{DocumentStore, Snapshot, StoreError};

/// Health of a synchronizer's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Subscription is live; snapshots track the store.
    Live,
    /// The initial subscribe failed; the snapshot stays empty until the
    /// caller re-opens. There is no automatic retry.
    Failed(String),
}

/// Decoded-snapshot cache keyed by the source snapshot identity.
type DecodeCache<T> = Mutex<Option<(Snapshot, Arc<Vec<T>>)>>;

/// A live, typed view of one store collection.
pub struct CollectionSynchronizer<T: CollectionEntity> {
    rx: Option<watch::Receiver<Snapshot>>,
    status: SyncStatus,
    cache: DecodeCache<T>,
}

impl<T: CollectionEntity> CollectionSynchronizer<T> {
    /// Opens a subscription for `T::COLLECTION`.
    ///
    /// A failed subscribe still yields a synchronizer: its snapshot is empty
    /// and `status()` reports the failure, so the owning view can degrade
    /// visibly instead of crashing.
    pub async fn open(store: &dyn DocumentStore) -> Self {
        match store.subscribe_collection(T::COLLECTION).await {
            Ok(rx) => Self {
                rx: Some(rx),
                status: SyncStatus::Live,
                cache: Mutex::new(None),
            },
            Err(e) => {
                warn!(collection = T::COLLECTION, error = %e, "Collection subscribe failed");
                Self {
                    rx: None,
                    status: SyncStatus::Failed(e.to_string()),
                    cache: Mutex::new(None),
                }
            }
        }
    }

    /// Subscription health.
    pub fn status(&self) -> SyncStatus {
        self.status.clone()
    }

    /// The latest typed snapshot.
    ///
    /// Documents that fail to decode are skipped with a warning; a schema
    /// drift in one document must not blank the whole collection.
    pub fn current(&self) -> Arc<Vec<T>> {
        let Some(rx) = &self.rx else {
            return Arc::new(Vec::new());
        };

        let raw: Snapshot = rx.borrow().clone();

        let mut cache = self.cache.lock().unwrap();
        if let Some((source, decoded)) = &*cache {
            if Arc::ptr_eq(source, &raw) {
                return decoded.clone();
            }
        }

        let decoded: Arc<Vec<T>> = Arc::new(
            raw.iter()
                .filter_map(|doc| match doc.decode::<T>() {
                    Ok(entity) => Some(entity),
                    Err(e) => {
                        warn!(collection = T::COLLECTION, error = %e, "Skipping undecodable document");
                        None
                    }
                })
                .collect(),
        );
        *cache = Some((raw, decoded.clone()));
        decoded
    }

    /// Finds one entity in the latest snapshot.
    pub fn find(&self, id: uuid::Uuid) -> Option<T> {
        self.current().iter().find(|e| e.id() == id).cloned()
    }

    /// A change-notification receiver; await `changed()` on it, then read
    /// `current()` for the replacement snapshot.
    pub fn watch(&self) -> Option<watch::Receiver<Snapshot>> {
        self.rx.clone()
    }

    /// Releases the subscription channel.
    pub fn close(self) {
        drop(self);
    }
}

impl<T: CollectionEntity> std::fmt::Debug for CollectionSynchronizer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionSynchronizer")
            .field("collection", &T::COLLECTION)
            .field("status", &self.status)
            .finish()
    }
}

/// Convenience for opening a synchronizer or reporting the subscription
/// error upstream while still leaving the empty-snapshot fallback to the
/// caller.
pub async fn open_synchronizer<T: CollectionEntity>(
    store: &dyn DocumentStore,
) -> Result<CollectionSynchronizer<T>, StoreError> {
    let sync = CollectionSynchronizer::<T>::open(store).await;
    match sync.status() {
        SyncStatus::Live => Ok(sync),
        SyncStatus::Failed(reason) => Err(StoreError::Subscription(reason)),
    }
}
