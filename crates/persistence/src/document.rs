//! Generic document envelope for store collections.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::store::StoreError;

/// A document as held by the store: entity fields plus the store-assigned
/// id and timestamps.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub fields: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Full JSON view of the document: entity fields with the
    /// store-assigned `id`, `createdAt` and `updatedAt` merged in.
    pub fn to_value(&self) -> Value {
        let mut merged = self.fields.clone();
        merged.insert("id".to_string(), Value::String(self.id.to_string()));
        merged.insert(
            "createdAt".to_string(),
            serde_json::to_value(self.created_at).unwrap_or(Value::Null),
        );
        merged.insert(
            "updatedAt".to_string(),
            serde_json::to_value(self.updated_at).unwrap_or(Value::Null),
        );
        Value::Object(merged)
    }

    /// Decodes the document into a typed entity.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.to_value()).map_err(|e| StoreError::Decode {
            id: self.id,
            reason: e.to_string(),
        })
    }
}

/// Serializes a payload into store fields.
///
/// The payload must serialize to a JSON object; anything else is a caller
/// bug surfaced as a write error.
pub fn fields_from<T: Serialize>(payload: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Write(format!(
            "payload must be a JSON object, got {}",
            match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                Value::String(_) => "a string",
                Value::Array(_) => "an array",
                Value::Object(_) => unreachable!(),
            }
        ))),
        Err(e) => Err(StoreError::Write(e.to_string())),
    }
}
