//! Detail records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Hydrated record for one catalog entry.
///
/// The body is opaque to the search layer and passed through to callers
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityDetail(Value);

impl EntityDetail {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// The record's `name` field, if it carries one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    pub fn into_body(self) -> Value {
        self.0
    }
}

impl From<Value> for EntityDetail {
    fn from(body: Value) -> Self {
        Self(body)
    }
}
