//! Field path resolution over JSON documents.
//!
//! A document is viewed as a tree of three node kinds. Resolving a dotted
//! path walks it segment by segment:
//!
//! - object: look the segment up as a key; a missing key means no value
//! - array: collect the segment's value from every element that is an object, stringify each,
//!   and join them with commas; the walk ends there, remaining segments are ignored
//! - scalar: a scalar with segments still left to walk has no value
//!
//! When the segments run out, the node reached is stringified.
//!
//! Known inconsistency, kept on purpose: the comma-joined array value is
//! compared as one string, so a lookup for a single element's value only
//! matches when that element is the only one carrying the field.

use serde_json::{Map, Value};

use crate::constants::{ARRAY_VALUE_SEPARATOR, FIELD_PATH_SEPARATOR};

/// Borrowed view of a JSON value, reduced to the shapes traversal cares about.
#[derive(Debug, Clone, Copy)]
pub enum FieldNode<'a> {
    /// JSON object.
    Object(&'a Map<String, Value>),
    /// JSON array.
    Array(&'a [Value]),
    /// String, number, boolean or null.
    Scalar(&'a Value),
}

impl<'a> From<&'a Value> for FieldNode<'a> {
    fn from(value: &'a Value) -> Self {
        match *value {
            Value::Object(ref map) => Self::Object(map),
            Value::Array(ref items) => Self::Array(items),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Scalar(value),
        }
    }
}

/// Splits a dotted field path into its segments.
pub fn split_path(path: &str) -> Vec<&str> { path.split(FIELD_PATH_SEPARATOR).collect() }

/// Resolves `path` (already split) against `root`, returning the stringified value.
pub fn resolve_segments(segments: &[&str], root: &Value) -> Option<String> {
    let mut current = root;
    for segment in segments {
        match FieldNode::from(current) {
            FieldNode::Object(map) => current = map.get(*segment)?,
            FieldNode::Array(items) => return join_array_field(items, segment),
            FieldNode::Scalar(_) => return None,
        }
    }
    Some(stringify(current))
}

/// Resolves a dotted `path` against `root`.
pub fn resolve_field(path: &str, root: &Value) -> Option<String> { resolve_segments(&split_path(path), root) }

fn join_array_field(items: &[Value], segment: &str) -> Option<String> {
    let values: Vec<String> = items
        .iter()
        .filter_map(|item| {
            match FieldNode::from(item) {
                FieldNode::Object(map) => map.get(segment).map(stringify),
                FieldNode::Array(_) | FieldNode::Scalar(_) => None,
            }
        })
        .collect();

    if values.is_empty() {
        None
    }
    else {
        Some(values.join(ARRAY_VALUE_SEPARATOR))
    }
}

/// Renders a value the way it is compared during lookups.
///
/// Strings are used verbatim, other scalars in their JSON text form, and
/// objects or arrays as compact JSON.
pub fn stringify(value: &Value) -> String {
    match FieldNode::from(value) {
        FieldNode::Scalar(Value::String(s)) => s.clone(),
        FieldNode::Scalar(other) => other.to_string(),
        FieldNode::Object(_) | FieldNode::Array(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalar_fields() {
        let doc = json!({"name": "Alice", "age": 30, "admin": false, "note": null, "ratio": 1.5});
        assert_eq!(resolve_field("name", &doc).as_deref(), Some("Alice"));
        assert_eq!(resolve_field("age", &doc).as_deref(), Some("30"));
        assert_eq!(resolve_field("admin", &doc).as_deref(), Some("false"));
        assert_eq!(resolve_field("note", &doc).as_deref(), Some("null"));
        assert_eq!(resolve_field("ratio", &doc).as_deref(), Some("1.5"));
        assert_eq!(resolve_field("missing", &doc), None);
    }

    #[test]
    fn test_nested_objects() {
        let doc = json!({"address": {"city": "Paris", "geo": {"lat": 48}}});
        assert_eq!(resolve_field("address.city", &doc).as_deref(), Some("Paris"));
        assert_eq!(resolve_field("address.geo.lat", &doc).as_deref(), Some("48"));
        assert_eq!(resolve_field("address.zip", &doc), None);
        assert_eq!(
            resolve_field("address.geo", &doc).as_deref(),
            Some(r#"{"lat":48}"#)
        );
    }

    #[test]
    fn test_scalar_with_remaining_segments() {
        let doc = json!({"name": "Alice"});
        assert_eq!(resolve_field("name.first", &doc), None);
    }

    #[test]
    fn test_array_of_objects_joins_values() {
        let doc = json!({"tags": [{"name": "red"}, {"name": "blue"}, {"other": 1}, "loose"]});
        assert_eq!(resolve_field("tags.name", &doc).as_deref(), Some("red,blue"));
        assert_eq!(resolve_field("tags.absent", &doc), None);
    }

    #[test]
    fn test_array_stops_traversal() {
        // The walk ends at the array; "ignored" is never looked at.
        let doc = json!({"items": [{"meta": {"ignored": 1}}]});
        assert_eq!(
            resolve_field("items.meta.ignored", &doc).as_deref(),
            Some(r#"{"ignored":1}"#)
        );
    }

    #[test]
    fn test_single_element_lookup_does_not_match_joined_value() {
        let doc = json!({"tags": [{"name": "red"}, {"name": "blue"}]});
        assert_ne!(resolve_field("tags.name", &doc).as_deref(), Some("red"));

        let single = json!({"tags": [{"name": "red"}]});
        assert_eq!(resolve_field("tags.name", &single).as_deref(), Some("red"));
    }

    #[test]
    fn test_root_array_and_scalar() {
        assert_eq!(
            resolve_field("k", &json!([{"k": 1}, {"k": 2}])).as_deref(),
            Some("1,2")
        );
        assert_eq!(resolve_field("k", &json!("text")), None);
    }

    #[test]
    fn test_stringify_containers() {
        assert_eq!(stringify(&json!([1, "a"])), r#"[1,"a"]"#);
        assert_eq!(stringify(&json!("plain")), "plain");
    }
}
