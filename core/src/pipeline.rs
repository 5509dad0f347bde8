#![deny(missing_docs)]

//! # Scrub Pipeline
//!
//! Drives (normalize → validate → scrub) passes.
//!
//! A single pass combines the converter's dialect errors with the structural
//! validator's findings and deletes the implicated subtrees. The exhaustive
//! variant repeats passes to a fixpoint, with an explicit pass bound and a
//! stall check so documents carrying only unscrubbable defects terminate
//! instead of looping.

use crate::convert::{ConvertedSpec, Converter, Dialect, DialectError};
use crate::error::CoreResult;
use crate::path::JsonPath;
use crate::scrub::{prune_empty, scrub_paths};
use crate::validation::{validate_document, ValidationError};
use serde::Serialize;
use serde_json::Value;

/// Upper bound on (normalize → validate → scrub) passes in one exhaustive
/// run. Convergence normally takes as many passes as the longest cascade of
/// orphaned references, which is far below this backstop.
pub const MAX_PASSES: usize = 16;

/// Options shared by the single-pass and exhaustive operations.
#[derive(Debug, Clone)]
pub struct ScrubOptions {
    /// Dialect of the input source.
    pub from: Dialect,
    /// Rule codes to suppress (both converter and validator codes).
    pub ignore_codes: Vec<String>,
}

impl ScrubOptions {
    /// Options for a source in dialect `from`, ignoring nothing.
    pub fn new(from: Dialect) -> Self {
        ScrubOptions {
            from,
            ignore_codes: Vec::new(),
        }
    }
}

/// One reported defect, unified across the converter and the structural
/// validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedError {
    /// Rule code (validator kinds use their kebab-case codes).
    pub code: String,
    /// Where the rule fired.
    pub path: JsonPath,
    /// Human-readable description.
    pub message: String,
}

impl From<ValidationError> for ReportedError {
    fn from(error: ValidationError) -> Self {
        ReportedError {
            code: error.kind.code().to_string(),
            path: error.path,
            message: error.message,
        }
    }
}

impl From<DialectError> for ReportedError {
    fn from(error: DialectError) -> Self {
        ReportedError {
            message: format!("Converter reported rule '{}'", error.code),
            code: error.code,
            path: error.path,
        }
    }
}

/// A reported defect tagged with the exhaustive pass that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassError {
    /// 0-based index of the pass.
    pub iteration: usize,
    /// The defect itself.
    #[serde(flatten)]
    pub error: ReportedError,
}

/// Result of one (normalize → validate → scrub) pass.
#[derive(Debug, Clone)]
pub struct ScrubOutcome {
    /// The pruned document.
    pub spec: Value,
    /// Every non-ignored defect the pass reported, in traversal order.
    pub errors: Vec<ReportedError>,
}

/// Result of an exhaustive run.
#[derive(Debug, Clone)]
pub struct ExhaustiveOutcome {
    /// The final document.
    pub spec: Value,
    /// Defects across all passes, ordered by pass then traversal order.
    pub errors: Vec<PassError>,
    /// True when the last pass reported zero defects. False means
    /// unscrubbable errors remain (or the pass bound was hit); the entries
    /// of the final recorded pass identify them.
    pub converged: bool,
}

/// Runs one (normalize → validate → scrub) pass over `source`.
///
/// Converter dialect errors come first, then structural errors in traversal
/// order; `ignore_codes` filters the combined list before scrubbing. The
/// pruned document is materialized even when unscrubbable errors remain, and
/// the report is materialized even when it is empty.
pub fn validate_and_scrub<C: Converter>(
    converter: &C,
    source: &str,
    options: &ScrubOptions,
) -> CoreResult<ScrubOutcome> {
    let converted = converter.convert(options.from, Dialect::CANONICAL, source)?;
    let document = converted.document().clone();

    let mut errors: Vec<ReportedError> = converted
        .validate()?
        .into_iter()
        .map(ReportedError::from)
        .collect();
    errors.extend(
        validate_document(&document)?
            .into_iter()
            .map(ReportedError::from),
    );
    errors.retain(|error| !options.ignore_codes.contains(&error.code));
    log::debug!("pass reported {} errors", errors.len());

    let spec = scrub_paths(document, errors.iter().map(|error| &error.path))?;
    Ok(ScrubOutcome { spec, errors })
}

/// Repeats [`validate_and_scrub`] until a pass reports zero defects, the
/// document stops changing, or [`MAX_PASSES`] is reached.
///
/// After the first pass the working document is already canonical and is
/// re-fed as such; the source dialect is converted exactly once. Emptied
/// path entries are pruned between passes, so a cascade (operation →
/// orphaned path entry → orphaned definition) resolves one unit per pass.
pub fn validate_and_scrub_exhaustive<C: Converter>(
    converter: &C,
    source: &str,
    options: &ScrubOptions,
) -> CoreResult<ExhaustiveOutcome> {
    let first = validate_and_scrub(converter, source, options)?;
    if first.errors.is_empty() {
        return Ok(ExhaustiveOutcome {
            spec: first.spec,
            errors: Vec::new(),
            converged: true,
        });
    }

    let mut errors: Vec<PassError> = first
        .errors
        .into_iter()
        .map(|error| PassError {
            iteration: 0,
            error,
        })
        .collect();
    let mut spec = prune_empty(first.spec);
    let mut converged = false;

    let canonical = ScrubOptions {
        from: Dialect::CANONICAL,
        ignore_codes: options.ignore_codes.clone(),
    };
    for iteration in 1..MAX_PASSES {
        let text = serde_json::to_string(&spec)?;
        let outcome = validate_and_scrub(converter, &text, &canonical)?;
        if outcome.errors.is_empty() {
            converged = true;
            break;
        }
        errors.extend(outcome.errors.into_iter().map(|error| PassError {
            iteration,
            error,
        }));
        let next = prune_empty(outcome.spec);
        if next == spec {
            log::debug!("pass {} made no progress, stopping", iteration);
            break;
        }
        spec = next;
    }

    Ok(ExhaustiveOutcome {
        spec,
        errors,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::IdentityConverter;
    use serde_json::json;

    fn options() -> ScrubOptions {
        ScrubOptions::new(Dialect::Swagger2)
    }

    #[test]
    fn test_clean_document_passes_through_unchanged() {
        let source = json!({
            "swagger": "2.0",
            "paths": { "/empty-but-valid": {} },
            "definitions": {}
        })
        .to_string();
        let outcome =
            validate_and_scrub_exhaustive(&IdentityConverter, &source, &options()).unwrap();
        assert!(outcome.converged);
        assert!(outcome.errors.is_empty());
        // no scrubbing happened, so pre-existing empty entries survive
        assert_eq!(
            outcome.spec["paths"],
            json!({ "/empty-but-valid": {} })
        );
    }

    #[test]
    fn test_ignore_codes_suppress_rules() {
        let source = json!({ "swagger": "2.0", "paths": {} }).to_string();
        let mut opts = options();
        opts.ignore_codes = vec!["missing-definitions".to_string()];
        let outcome = validate_and_scrub(&IdentityConverter, &source, &opts).unwrap();
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_errors_carry_codes_and_locations() {
        let source = json!({ "swagger": "2.0", "paths": {} }).to_string();
        let outcome = validate_and_scrub(&IdentityConverter, &source, &options()).unwrap();
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].code, "missing-definitions");
        assert!(outcome.errors[0].path.is_empty());
    }

    #[test]
    fn test_report_serializes_with_flattened_iteration() {
        let entry = PassError {
            iteration: 2,
            error: ReportedError {
                code: "reference-not-found".into(),
                path: JsonPath::from_segments(["definitions", "broken"]),
                message: "Reference '#/definitions/missing' not found".into(),
            },
        };
        let rendered = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            rendered,
            json!({
                "iteration": 2,
                "code": "reference-not-found",
                "path": ["definitions", "broken"],
                "message": "Reference '#/definitions/missing' not found"
            })
        );
    }
}
