#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Parses `$ref` pointers and looks up the nodes they address.
//!
//! Only local references (`#/a/b/...`) are supported: a reference with any
//! other scheme is a defect in the input grammar, not a repairable document
//! defect, and fails fatally instead of producing a validation error.

use crate::error::{CoreError, CoreResult};
use crate::path::JsonPath;
use percent_encoding::percent_decode_str;
use serde_json::Value;

/// Parses a local `$ref` string into the path it addresses.
///
/// The reference must start with `#`; the leading segment is dropped and the
/// rest are decoded as JSON Pointer segments. `"#"` alone addresses the
/// document root (an empty path).
pub fn parse_ref(reference: &str) -> CoreResult<JsonPath> {
    let mut segments = reference.split('/');
    if segments.next() != Some("#") {
        return Err(CoreError::InvalidReference(reference.to_string()));
    }
    Ok(segments.map(decode_pointer_segment).collect())
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Walks `path` segment by segment from `root`.
///
/// Objects are indexed by key and arrays by numeric index; the walk answers
/// `None` as soon as any intermediate segment is absent.
pub fn lookup_json_path<'a>(root: &'a Value, path: &JsonPath) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.segments() {
        node = match node {
            Value::Object(entries) => entries.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}
