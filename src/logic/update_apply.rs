use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

use crate::logic::FilterEvaluator;
use crate::model::{Document, FieldPath, Filter, PushSpec, UpdateSpec};

/// Apply an update specification to a document in place. Returns whether any
/// field actually changed, which drives the modified count of the store.
pub fn apply_update(document: &mut Document, update: &UpdateSpec) -> Result<bool> {
    let mut changed = false;
    for (path, value) in &update.set {
        changed |= set_field(&mut document.fields, path, value.clone())?;
    }
    for (path, push) in &update.push {
        changed |= push_elements(&mut document.fields, path, push)?;
    }
    for (path, condition) in &update.pull {
        changed |= pull_elements(&mut document.fields, path, condition)?;
    }
    Ok(changed)
}

fn set_field(fields: &mut Map<String, Value>, path: &FieldPath, value: Value) -> Result<bool> {
    if path.as_str() == "_id" {
        return Err(anyhow!("the _id field is immutable"));
    }

    let segments: Vec<&str> = path.segments().collect();
    let (leaf, parents) = split_leaf(path, &segments)?;
    let parent = descend_creating(fields, parents)?;

    if parent.get(leaf) == Some(&value) {
        return Ok(false);
    }
    parent.insert(leaf.to_string(), value);
    Ok(true)
}

fn push_elements(fields: &mut Map<String, Value>, path: &FieldPath, push: &PushSpec) -> Result<bool> {
    let elements: &[Value] = match push {
        PushSpec::Each { each } => each.as_slice(),
        PushSpec::One(value) => std::slice::from_ref(value),
    };
    if elements.is_empty() {
        return Ok(false);
    }

    let segments: Vec<&str> = path.segments().collect();
    let (leaf, parents) = split_leaf(path, &segments)?;
    let parent = descend_creating(fields, parents)?;

    match parent
        .entry(leaf.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        Value::Array(target) => {
            target.extend(elements.iter().cloned());
            Ok(true)
        }
        _ => Err(anyhow!("push target {} is not an array", path)),
    }
}

fn pull_elements(fields: &mut Map<String, Value>, path: &FieldPath, condition: &Filter) -> Result<bool> {
    // A missing field is a no-op, but a present non-array is an error.
    let Some(target) = lookup_mut(fields, path) else {
        return Ok(false);
    };
    let Value::Array(elements) = target else {
        return Err(anyhow!("pull target {} is not an array", path));
    };

    let mut matched = Vec::with_capacity(elements.len());
    for element in elements.iter() {
        matched.push(FilterEvaluator::matches_value(element, condition)?);
    }
    let removed = matched.iter().any(|m| *m);

    let mut index = 0;
    elements.retain(|_| {
        let keep = !matched[index];
        index += 1;
        keep
    });
    Ok(removed)
}

fn split_leaf<'a>(path: &FieldPath, segments: &'a [&'a str]) -> Result<(&'a str, &'a [&'a str])> {
    match segments.split_last() {
        Some((leaf, parents)) if !leaf.is_empty() && parents.iter().all(|s| !s.is_empty()) => {
            Ok((*leaf, parents))
        }
        _ => Err(anyhow!("invalid field path: {:?}", path.as_str())),
    }
}

/// Walk down to the parent object of a path, creating intermediate objects
/// along the way.
fn descend_creating<'a>(
    fields: &'a mut Map<String, Value>,
    parents: &[&str],
) -> Result<&'a mut Map<String, Value>> {
    let mut current = fields;
    for segment in parents {
        current = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| anyhow!("cannot descend into non-object field {}", segment))?;
    }
    Ok(current)
}

fn lookup_mut<'a>(fields: &'a mut Map<String, Value>, path: &FieldPath) -> Option<&'a mut Value> {
    let mut segments = path.segments();
    let mut current = fields.get_mut(segments.next()?)?;
    for segment in segments {
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_document() -> Document {
        Document::from_value(json!({
            "_id": "order-1",
            "film": {
                "title": "Неистовый",
                "rating": 6.3,
                "cashback": 0.15,
                "genres": ["триллер"]
            },
            "seats": [{"row": 1, "number": 3}, {"row": 1, "number": 4}],
            "price": 200000
        }))
        .unwrap()
    }

    #[test]
    fn test_set_nested_field() {
        let mut doc = order_document();
        let spec = UpdateSpec::set_one("film.cashback", json!(0.10));

        assert!(apply_update(&mut doc, &spec).unwrap());
        assert_eq!(
            doc.field("film").and_then(|f| f.get("cashback")),
            Some(&json!(0.10))
        );

        // Setting the same value again reports no modification
        assert!(!apply_update(&mut doc, &spec).unwrap());
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut doc = Document::from_value(json!({})).unwrap();
        let spec = UpdateSpec::set_one("film.title", json!("Довод"));

        assert!(apply_update(&mut doc, &spec).unwrap());
        assert_eq!(doc.fields.get("film"), Some(&json!({"title": "Довод"})));
    }

    #[test]
    fn test_set_id_is_rejected() {
        let mut doc = order_document();
        let spec = UpdateSpec::set_one("_id", json!("other"));
        assert!(apply_update(&mut doc, &spec).is_err());
        assert_eq!(doc.id, "order-1");
    }

    #[test]
    fn test_push_each_appends_in_order() {
        let mut doc = order_document();
        let spec = UpdateSpec::push_each(
            "seats",
            vec![json!({"row": 8, "number": 5}), json!({"row": 8, "number": 6})],
        );

        assert!(apply_update(&mut doc, &spec).unwrap());
        assert_eq!(
            doc.field("seats"),
            Some(&json!([
                {"row": 1, "number": 3},
                {"row": 1, "number": 4},
                {"row": 8, "number": 5},
                {"row": 8, "number": 6}
            ]))
        );
    }

    #[test]
    fn test_push_creates_missing_array() {
        let mut doc = Document::from_value(json!({})).unwrap();
        let spec = UpdateSpec::push_one("tags", json!("new"));

        assert!(apply_update(&mut doc, &spec).unwrap());
        assert_eq!(doc.field("tags"), Some(&json!(["new"])));
    }

    #[test]
    fn test_push_into_non_array_is_an_error() {
        let mut doc = order_document();
        let spec = UpdateSpec::push_one("price", json!(1));
        assert!(apply_update(&mut doc, &spec).is_err());
    }

    #[test]
    fn test_pull_removes_matching_elements() {
        let mut doc = order_document();
        apply_update(
            &mut doc,
            &UpdateSpec::push_each(
                "seats",
                vec![json!({"row": 8, "number": 5}), json!({"row": 8, "number": 6})],
            ),
        )
        .unwrap();

        let spec = UpdateSpec::pull_where(
            "seats",
            Filter::any_of(vec![
                Filter::all_of(vec![
                    Filter::eq("row", json!(8)),
                    Filter::eq("number", json!(5)),
                ]),
                Filter::all_of(vec![
                    Filter::eq("row", json!(8)),
                    Filter::eq("number", json!(6)),
                ]),
            ]),
        );

        assert!(apply_update(&mut doc, &spec).unwrap());
        assert_eq!(
            doc.field("seats"),
            Some(&json!([
                {"row": 1, "number": 3},
                {"row": 1, "number": 4}
            ]))
        );

        // Nothing left to pull: applies cleanly, reports no modification
        assert!(!apply_update(&mut doc, &spec).unwrap());
    }

    #[test]
    fn test_pull_on_missing_field_is_a_noop() {
        let mut doc = order_document();
        let spec = UpdateSpec::pull_where("history", Filter::match_all());
        assert!(!apply_update(&mut doc, &spec).unwrap());
    }

    #[test]
    fn test_pull_on_non_array_is_an_error() {
        let mut doc = order_document();
        let spec = UpdateSpec::pull_where("film", Filter::match_all());
        assert!(apply_update(&mut doc, &spec).is_err());
    }

    #[test]
    fn test_clauses_apply_in_order() {
        let mut doc = order_document();
        let spec = UpdateSpec {
            set: [(FieldPath::from("film.cashback"), json!(0.10))].into(),
            push: [(
                FieldPath::from("seats"),
                PushSpec::One(json!({"row": 9, "number": 1})),
            )]
            .into(),
            pull: [(
                FieldPath::from("seats"),
                Filter::eq("row", json!(9)),
            )]
            .into(),
        };

        assert!(apply_update(&mut doc, &spec).unwrap());
        // The pushed seat is pulled right back out by the same spec
        assert_eq!(
            doc.field("seats"),
            Some(&json!([
                {"row": 1, "number": 3},
                {"row": 1, "number": 4}
            ]))
        );
        assert_eq!(
            doc.field("film").and_then(|f| f.get("cashback")),
            Some(&json!(0.10))
        );
    }
}
