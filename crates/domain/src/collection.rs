//! Binding between domain entities and their store collections.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// An entity managed in a named store collection.
///
/// Every managed document carries a store-assigned immutable `id` plus
/// `createdAt`/`updatedAt` timestamps; the remaining fields are entity
/// specific. Implementors are plain data: decoding a snapshot document into
/// the entity type must never require extra context.
pub trait CollectionEntity:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Name of the store collection holding this entity type.
    const COLLECTION: &'static str;

    /// Store-assigned document id.
    fn id(&self) -> Uuid;

    /// Store-assigned creation timestamp.
    fn created_at(&self) -> DateTime<Utc>;

    /// Store-assigned last-write timestamp, never earlier than `created_at`.
    fn updated_at(&self) -> DateTime<Utc>;
}
