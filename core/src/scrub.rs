#![deny(missing_docs)]

//! # Scrub Engine
//!
//! Maps validation errors back onto the document as deletions of the
//! smallest addressable subtree (an operation for `paths`-rooted errors, a
//! whole definition for `definitions`-rooted ones) and collapses containers
//! emptied by those deletions.

use crate::error::CoreResult;
use crate::path::{delete_json_path, JsonPath};
use crate::validation::ValidationError;
use indexmap::IndexSet;
use serde_json::Value;

/// Segments addressing an operation: `paths`, template, method.
const OPERATION_UNIT: usize = 3;
/// Segments addressing a definition: `definitions`, name.
const DEFINITION_UNIT: usize = 2;

/// Maps one error location to its deletion unit, when the error is
/// actionable.
///
/// Root-level and container-level errors (fewer than two segments) have no
/// entry to address and pass through unscrubbed. A two-segment `paths` error
/// deletes the whole path entry, since the template itself is the defect.
fn deletion_target(path: &JsonPath) -> Option<JsonPath> {
    if path.len() < 2 {
        return None;
    }
    match path.first()? {
        "paths" => Some(path.truncated(OPERATION_UNIT)),
        "definitions" => Some(path.truncated(DEFINITION_UNIT)),
        _ => None,
    }
}

/// Collects the deletion units implied by `error_paths`, deduplicated in
/// first-seen order (one unit may be implicated by several errors).
pub fn deletion_targets<'a>(error_paths: impl IntoIterator<Item = &'a JsonPath>) -> Vec<JsonPath> {
    let targets: IndexSet<JsonPath> = error_paths.into_iter().filter_map(deletion_target).collect();
    targets.into_iter().collect()
}

/// Applies every actionable deletion implied by `error_paths` to `document`.
pub fn scrub_paths<'a>(
    document: Value,
    error_paths: impl IntoIterator<Item = &'a JsonPath>,
) -> CoreResult<Value> {
    let mut result = document;
    for target in deletion_targets(error_paths) {
        log::debug!("deleting '{}'", target);
        result = delete_json_path(result, &target)?;
    }
    Ok(result)
}

/// Convenience wrapper over [`scrub_paths`] for validator output.
pub fn scrub_errors(document: Value, errors: &[ValidationError]) -> CoreResult<Value> {
    scrub_paths(document, errors.iter().map(|error| &error.path))
}

/// Cleanup between exhaustive passes: drops `paths` entries whose method map
/// was emptied by scrubbing.
///
/// An emptied `definitions` container is deliberately kept as an empty
/// object; removing it would re-trigger `missing-definitions` on the next
/// pass and turn a repaired document into a permanently stalled one.
pub fn prune_empty(mut document: Value) -> Value {
    if let Some(entries) = document.get_mut("paths").and_then(Value::as_object_mut) {
        entries.retain(|template, content| {
            let keep = content
                .as_object()
                .map(|methods| !methods.is_empty())
                .unwrap_or(true);
            if !keep {
                log::debug!("dropping emptied path entry '{}'", template);
            }
            keep
        });
    }
    document
}
