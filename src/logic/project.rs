use itertools::Itertools;
use serde_json::{Map, Value};

use crate::model::{Document, FieldPath, Projection};

/// Apply a projection to a single query result. Stored documents are never
/// mutated; the identity always survives.
pub fn project_document(document: &Document, projection: &Projection) -> Document {
    match projection {
        Projection::Exclude { exclude } => {
            let mut fields = document.fields.clone();
            exclude_from(&mut fields, to_segments(exclude));
            Document {
                id: document.id.clone(),
                fields,
            }
        }
        Projection::Include { include } => Document {
            id: document.id.clone(),
            fields: include_from(&document.fields, to_segments(include)),
        },
    }
}

fn to_segments(paths: &[FieldPath]) -> Vec<Vec<&str>> {
    paths
        .iter()
        .map(|path| path.segments().collect())
        .collect()
}

/// Group paths by their first segment, yielding the remaining segments per
/// group. A path fully consumed at this level shows up as an empty rest.
fn group_by_head(paths: Vec<Vec<&str>>) -> std::collections::HashMap<&str, Vec<Vec<&str>>> {
    paths
        .into_iter()
        .filter(|segments| !segments.is_empty() && !segments[0].is_empty())
        .map(|mut segments| {
            let head = segments.remove(0);
            (head, segments)
        })
        .into_group_map()
}

fn exclude_from(map: &mut Map<String, Value>, paths: Vec<Vec<&str>>) {
    for (head, subpaths) in group_by_head(paths) {
        if subpaths.iter().any(|rest| rest.is_empty()) {
            map.remove(head);
        } else if let Some(Value::Object(child)) = map.get_mut(head) {
            exclude_from(child, subpaths);
        }
    }
}

fn include_from(map: &Map<String, Value>, paths: Vec<Vec<&str>>) -> Map<String, Value> {
    let mut kept = Map::new();
    for (head, subpaths) in group_by_head(paths) {
        let Some(value) = map.get(head) else { continue };
        if subpaths.iter().any(|rest| rest.is_empty()) {
            kept.insert(head.to_string(), value.clone());
        } else if let Value::Object(child) = value {
            let projected = include_from(child, subpaths);
            if !projected.is_empty() {
                kept.insert(head.to_string(), Value::Object(projected));
            }
        }
    }
    kept
}
