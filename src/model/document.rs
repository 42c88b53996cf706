use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::model::{generate_id, Id};

/// A single stored record: an identity plus free-form fields. Serializes as
/// one flat JSON object with the identity under `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id", default = "generate_id")]
    pub id: Id,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// New document with a generated identity.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            id: generate_id(),
            fields,
        }
    }

    /// New document with an explicitly assigned identity.
    pub fn with_id(id: impl Into<Id>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a document from a JSON object. A missing `_id` gets a generated
    /// identity; a non-object value is an error.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Top-level field accessor.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Dotted path addressing a (possibly nested) document field, e.g.
/// `"film.rating"`. The single segment `_id` addresses the identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(pub String);

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
