#![deny(missing_docs)]

//! # specscrub core
//!
//! Structural sanitizer for Swagger/OpenAPI description documents: a
//! cycle-safe validator walks the (possibly self-referential) `$ref` graph
//! and reports typed errors with exact locations, and a scrub engine
//! converts those errors back into deletions of the smallest offending
//! subtree, repeated to a fixpoint.
//!
//! Dialect conversion and dialect-deep validation are external capabilities
//! behind the [`convert::Converter`] trait; the built-in
//! [`convert::IdentityConverter`] handles sources already in the canonical
//! Swagger 2.0 dialect.

/// Shared fatal error types.
pub mod error;

/// Document addressing and copy-on-write deletion.
pub mod path;

/// `$ref` parsing and lookup.
pub mod refs;

/// Tagged classification of schema nodes.
pub mod schema;

/// Cycle-safe traversal state.
pub mod context;

/// The recursive document validator and its error taxonomy.
pub mod validation;

/// Error-to-deletion mapping and container cleanup.
pub mod scrub;

/// Dialect names and the external converter seam.
pub mod convert;

/// Single-pass and exhaustive scrub orchestration.
pub mod pipeline;

pub use context::{Context, NodeId, VisitedSet};
pub use convert::{ConvertedSpec, Converter, Dialect, DialectError, IdentityConverter};
pub use error::{CoreError, CoreResult};
pub use path::{delete_json_path, JsonPath};
pub use pipeline::{
    validate_and_scrub, validate_and_scrub_exhaustive, ExhaustiveOutcome, PassError,
    ReportedError, ScrubOptions, ScrubOutcome, MAX_PASSES,
};
pub use refs::{lookup_json_path, parse_ref};
pub use schema::SchemaNode;
pub use scrub::{deletion_targets, prune_empty, scrub_errors, scrub_paths};
pub use validation::{
    template_parameters, validate_document, ErrorKind, ValidationError,
    SUPPORTED_SWAGGER_VERSION,
};
