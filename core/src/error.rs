//! # Error Handling
//!
//! Provides the unified `CoreError` enum used across the workspace.
//!
//! This is the *fatal* channel only: defects in the document under inspection
//! are represented as [`crate::validation::ValidationError`] data and are
//! never routed through here.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum CoreError {
    /// Wrapper for JSON (de)serialization errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML parse errors.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A `$ref` outside the supported local (`#`-prefixed) grammar.
    /// This marks malformed input outside the supported grammar, not a
    /// repairable document defect.
    #[from(ignore)]
    #[display("Invalid reference '{_0}'")]
    InvalidReference(String),

    /// The caller violated an API contract (e.g. deleting with an empty
    /// path). Indicates a defect in the calling code.
    #[from(ignore)]
    #[display("Contract violation: {_0}")]
    Contract(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// We implement this manually (instead of `derive(Error)`) because several
/// variants contain a `String`, which does not implement `std::error::Error`,
/// causing auto-derived `source()` implementations to fail compilation.
impl std::error::Error for CoreError {}

/// Helper type alias for Result using CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
