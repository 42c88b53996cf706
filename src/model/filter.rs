use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::FieldPath;

/// Filter expression over documents, deserializable straight from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// Logical AND - all conditions must hold. Empty matches everything,
    /// which is the `{}` filter of the query surface.
    All { all: Vec<Filter> },
    /// Logical OR - at least one condition must hold
    Any { any: Vec<Filter> },
    /// Logical NOT - condition must be false
    Not { not: Box<Filter> },
    /// Exact equality. An object value compares as a whole subdocument.
    Eq { eq: (FieldPath, Value) },
    /// Not equal check
    Ne { ne: (FieldPath, Value) },
    /// Greater than check
    Gt { gt: (FieldPath, Value) },
    /// Greater than or equal check
    Gte { gte: (FieldPath, Value) },
    /// Less than check
    Lt { lt: (FieldPath, Value) },
    /// Less than or equal check
    Lte { lte: (FieldPath, Value) },
    /// Membership: a scalar matches if it equals any listed value, an array
    /// field matches if any of its elements does.
    In { r#in: (FieldPath, Vec<Value>) },
    /// Check if field exists
    Exists { exists: FieldPath },
    /// Check if field does not exist
    NotExists { not_exists: FieldPath },
}

impl Filter {
    /// The match-everything filter.
    pub fn match_all() -> Self {
        Filter::All { all: Vec::new() }
    }

    pub fn all_of(filters: Vec<Filter>) -> Self {
        Filter::All { all: filters }
    }

    pub fn any_of(filters: Vec<Filter>) -> Self {
        Filter::Any { any: filters }
    }

    pub fn not(filter: Filter) -> Self {
        Filter::Not {
            not: Box::new(filter),
        }
    }

    pub fn eq(path: impl Into<FieldPath>, value: Value) -> Self {
        Filter::Eq {
            eq: (path.into(), value),
        }
    }

    pub fn ne(path: impl Into<FieldPath>, value: Value) -> Self {
        Filter::Ne {
            ne: (path.into(), value),
        }
    }

    pub fn gt(path: impl Into<FieldPath>, value: Value) -> Self {
        Filter::Gt {
            gt: (path.into(), value),
        }
    }

    pub fn gte(path: impl Into<FieldPath>, value: Value) -> Self {
        Filter::Gte {
            gte: (path.into(), value),
        }
    }

    pub fn lt(path: impl Into<FieldPath>, value: Value) -> Self {
        Filter::Lt {
            lt: (path.into(), value),
        }
    }

    pub fn lte(path: impl Into<FieldPath>, value: Value) -> Self {
        Filter::Lte {
            lte: (path.into(), value),
        }
    }

    pub fn is_in(path: impl Into<FieldPath>, values: Vec<Value>) -> Self {
        Filter::In {
            r#in: (path.into(), values),
        }
    }

    pub fn exists(path: impl Into<FieldPath>) -> Self {
        Filter::Exists {
            exists: path.into(),
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, Filter::All { all } if all.is_empty())
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::match_all()
    }
}
