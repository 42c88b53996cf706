use anyhow::{anyhow, Result};
use serde_json::Value;
use std::cmp::Ordering;

use crate::model::{Document, FieldPath, Filter};

/// Resolve a path against a document. `_id` addresses the identity; every
/// other path walks nested objects segment by segment.
pub fn resolve_path(document: &Document, path: &FieldPath) -> Result<Option<Value>> {
    if path.as_str() == "_id" {
        return Ok(Some(Value::String(document.id.clone())));
    }

    let mut segments = path.segments();
    let head = segments
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| anyhow!("invalid field path: {:?}", path.as_str()))?;

    let mut current = match document.fields.get(head) {
        Some(value) => value,
        None => return Ok(None),
    };
    for segment in segments {
        current = match current {
            Value::Object(map) => match map.get(segment) {
                Some(value) => value,
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
    }
    Ok(Some(current.clone()))
}

/// Resolve a path against a bare value, e.g. one element of an array field
/// when deciding what a pull clause removes.
pub fn resolve_path_in(value: &Value, path: &FieldPath) -> Result<Option<Value>> {
    if path.is_empty() {
        return Err(anyhow!("invalid field path: \"\""));
    }

    let mut current = value;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => match map.get(segment) {
                Some(value) => value,
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
    }
    Ok(Some(current.clone()))
}

/// Filter evaluator over documents and bare values.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Filter a list of documents, keeping the ones the filter matches.
    pub fn filter_documents(documents: Vec<Document>, filter: &Filter) -> Vec<Document> {
        documents
            .into_iter()
            .filter(|document| Self::matches_document(document, filter).unwrap_or(false))
            .collect()
    }

    /// Evaluate a filter against a single document.
    pub fn matches_document(document: &Document, filter: &Filter) -> Result<bool> {
        Self::eval(&|path| resolve_path(document, path), filter)
    }

    /// Evaluate a filter against a bare value (array element semantics).
    pub fn matches_value(value: &Value, filter: &Filter) -> Result<bool> {
        Self::eval(&|path| resolve_path_in(value, path), filter)
    }

    fn eval<F>(resolve: &F, filter: &Filter) -> Result<bool>
    where
        F: Fn(&FieldPath) -> Result<Option<Value>>,
    {
        match filter {
            Filter::All { all } => {
                for expr in all {
                    if !Self::eval(resolve, expr)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Filter::Any { any } => {
                for expr in any {
                    if Self::eval(resolve, expr)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            Filter::Not { not } => Ok(!Self::eval(resolve, not)?),

            Filter::Eq { eq: (path, value) } => Ok(resolve(path)?.as_ref() == Some(value)),

            Filter::Ne { ne: (path, value) } => Ok(resolve(path)?.as_ref() != Some(value)),

            Filter::Gt { gt: (path, value) } => Ok(matches!(
                Self::compare(resolve(path)?.as_ref(), value),
                Some(Ordering::Greater)
            )),

            Filter::Gte { gte: (path, value) } => Ok(matches!(
                Self::compare(resolve(path)?.as_ref(), value),
                Some(Ordering::Greater | Ordering::Equal)
            )),

            Filter::Lt { lt: (path, value) } => Ok(matches!(
                Self::compare(resolve(path)?.as_ref(), value),
                Some(Ordering::Less)
            )),

            Filter::Lte { lte: (path, value) } => Ok(matches!(
                Self::compare(resolve(path)?.as_ref(), value),
                Some(Ordering::Less | Ordering::Equal)
            )),

            Filter::In {
                r#in: (path, values),
            } => match resolve(path)? {
                // An array field matches if any of its elements is listed
                Some(Value::Array(elements)) => {
                    Ok(elements.iter().any(|element| values.contains(element)))
                }
                Some(value) => Ok(values.contains(&value)),
                None => Ok(false),
            },

            Filter::Exists { exists: path } => Ok(resolve(path)?.is_some()),

            Filter::NotExists { not_exists: path } => Ok(resolve(path)?.is_none()),
        }
    }

    /// Ordered comparison of two values. Numbers compare numerically,
    /// strings lexicographically; anything else is unordered and never
    /// matches a range filter.
    fn compare(left: Option<&Value>, right: &Value) -> Option<Ordering> {
        match (left?, right) {
            (Value::Number(l), Value::Number(r)) => l.as_f64()?.partial_cmp(&r.as_f64()?),
            (Value::String(l), Value::String(r)) => Some(l.as_str().cmp(r.as_str())),
            _ => None,
        }
    }
}

/// Filter documents using a strongly-typed filter expression. This is the
/// primary API for filtering documents in memory.
pub fn filter_documents(documents: Vec<Document>, filter: &Filter) -> Vec<Document> {
    FilterEvaluator::filter_documents(documents, filter)
}
