#![deny(missing_docs)]

//! # Document Addressing
//!
//! `JsonPath` is the single addressing scheme shared by the validator (to
//! report) and the scrub engine (to delete): an ordered list of string
//! segments identifying a node inside a document.
//!
//! Also hosts `delete_json_path`, the copy-on-write removal primitive the
//! scrub engine folds over a document.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Ordered list of string segments addressing a node inside a document.
///
/// Renders as segments joined by `/`; a segment that itself contains `/` is
/// quoted so the rendering stays unambiguous. Serializes as a JSON array of
/// strings, the same convention external converters use for their error
/// locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(Vec<String>);

impl JsonPath {
    /// The root location (no segments).
    pub fn new() -> Self {
        JsonPath(Vec::new())
    }

    /// Builds a path from any sequence of segment-like values.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JsonPath(segments.into_iter().map(Into::into).collect())
    }

    /// Appends `segment` in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }

    /// Returns a new path extended by `segment`, leaving `self` untouched.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut extended = self.clone();
        extended.push(segment);
        extended
    }

    /// Returns a new path keeping at most the first `limit` segments.
    pub fn truncated(&self, limit: usize) -> Self {
        JsonPath(self.0.iter().take(limit).cloned().collect())
    }

    /// The raw segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The first segment, when present.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root location.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for JsonPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        JsonPath::from_segments(iter)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "/")?;
            }
            if segment.contains('/') {
                write!(f, "\"{}\"", segment.replace('"', "\\\""))?;
            } else {
                write!(f, "{}", segment)?;
            }
        }
        Ok(())
    }
}

/// Removes the node addressed by `path` from `document`.
///
/// Only the branch leading to the deleted key is rebuilt; sibling subtrees
/// are moved into the result untouched. A path whose intermediate segment is
/// absent (or traverses a non-object) is a no-op. An empty path is a contract
/// violation and fails fatally.
pub fn delete_json_path(document: Value, path: &JsonPath) -> CoreResult<Value> {
    if path.is_empty() {
        return Err(CoreError::Contract(
            "delete_json_path called with an empty path".into(),
        ));
    }
    Ok(delete_segments(document, path.segments()))
}

fn delete_segments(document: Value, segments: &[String]) -> Value {
    let Value::Object(mut entries) = document else {
        return document;
    };
    match segments {
        [] => Value::Object(entries),
        [leaf] => {
            // shift_remove: `remove` is swap-based under preserve_order and
            // would destroy declaration order.
            entries.shift_remove(leaf.as_str());
            Value::Object(entries)
        }
        [head, rest @ ..] => {
            if let Some(slot) = entries.get_mut(head.as_str()) {
                let child = std::mem::take(slot);
                *slot = delete_segments(child, rest);
            }
            Value::Object(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: &[&str]) -> JsonPath {
        JsonPath::from_segments(segments.iter().copied())
    }

    #[test]
    fn test_delete_single_attribute() {
        let result = delete_json_path(json!({ "first": 3 }), &path(&["first"])).unwrap();
        assert_eq!(result, json!({}));
    }

    #[test]
    fn test_delete_keeps_unrelated_attributes_intact() {
        let result =
            delete_json_path(json!({ "first": 3, "second": 4 }), &path(&["first"])).unwrap();
        assert_eq!(result, json!({ "second": 4 }));
    }

    #[test]
    fn test_delete_nested_attribute() {
        let result = delete_json_path(
            json!({ "first": { "second": 3 } }),
            &path(&["first", "second"]),
        )
        .unwrap();
        assert_eq!(result, json!({ "first": {} }));
    }

    #[test]
    fn test_delete_absent_intermediate_is_noop() {
        let document = json!({ "first": { "second": 3 } });
        let result = delete_json_path(document.clone(), &path(&["missing", "second"])).unwrap();
        assert_eq!(result, document);
    }

    #[test]
    fn test_delete_empty_path_is_fatal() {
        let result = delete_json_path(json!({}), &JsonPath::new());
        assert!(matches!(result, Err(CoreError::Contract(_))));
    }

    #[test]
    fn test_delete_preserves_declaration_order() {
        let result = delete_json_path(
            json!({ "a": 1, "b": 2, "c": 3 }),
            &path(&["b"]),
        )
        .unwrap();
        let keys: Vec<&str> = result
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_display_quotes_segments_containing_slashes() {
        let rendered = path(&["paths", "/pets/{id}", "get"]).to_string();
        assert_eq!(rendered, "paths/\"/pets/{id}\"/get");
    }

    #[test]
    fn test_display_plain_segments() {
        assert_eq!(path(&["definitions", "Pet"]).to_string(), "definitions/Pet");
    }
}
