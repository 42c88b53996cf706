use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::{FieldPath, Filter};

/// Update specification with optional set/push/pull clauses, applied in that
/// order against each matched document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateSpec {
    /// Set a (possibly nested) field, creating intermediate objects.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub set: BTreeMap<FieldPath, Value>,
    /// Append elements to an array field, creating it if absent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub push: BTreeMap<FieldPath, PushSpec>,
    /// Remove every array element the condition matches.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pull: BTreeMap<FieldPath, Filter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushSpec {
    // Must be tried first: the One variant would otherwise swallow the
    // {"each": [...]} object as a plain value.
    /// Append several elements in the given order
    Each { each: Vec<Value> },
    /// Append a single element
    One(Value),
}

impl UpdateSpec {
    /// Spec with a single set clause.
    pub fn set_one(path: impl Into<FieldPath>, value: Value) -> Self {
        Self {
            set: BTreeMap::from([(path.into(), value)]),
            ..Default::default()
        }
    }

    /// Spec appending one element to an array field.
    pub fn push_one(path: impl Into<FieldPath>, value: Value) -> Self {
        Self {
            push: BTreeMap::from([(path.into(), PushSpec::One(value))]),
            ..Default::default()
        }
    }

    /// Spec appending several elements to an array field.
    pub fn push_each(path: impl Into<FieldPath>, values: Vec<Value>) -> Self {
        Self {
            push: BTreeMap::from([(path.into(), PushSpec::Each { each: values })]),
            ..Default::default()
        }
    }

    /// Spec removing every element of an array field the condition matches.
    pub fn pull_where(path: impl Into<FieldPath>, condition: Filter) -> Self {
        Self {
            pull: BTreeMap::from([(path.into(), condition)]),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.push.is_empty() && self.pull.is_empty()
    }
}
