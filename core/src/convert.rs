#![deny(missing_docs)]

//! # Converter Seam
//!
//! Dialect normalization and dialect-deep validation are external
//! capabilities. The traits here define the contract the orchestrator
//! programs against; `IdentityConverter` is the built-in implementation for
//! sources already in the canonical working dialect.

use crate::error::{CoreError, CoreResult};
use crate::path::JsonPath;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A specific revision/format of API description document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Swagger 1.x.
    Swagger1,
    /// Swagger 2.0, the canonical working dialect.
    Swagger2,
    /// OpenAPI 3.x.
    OpenApi3,
}

impl Dialect {
    /// The working dialect every source is normalized into before
    /// structural validation.
    pub const CANONICAL: Dialect = Dialect::Swagger2;

    /// Stable identifier, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Swagger1 => "swagger_1",
            Dialect::Swagger2 => "swagger_2",
            Dialect::OpenApi3 => "openapi_3",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "swagger_1" => Ok(Dialect::Swagger1),
            "swagger_2" => Ok(Dialect::Swagger2),
            "openapi_3" => Ok(Dialect::OpenApi3),
            other => Err(format!(
                "unknown dialect '{}' (expected swagger_1, swagger_2 or openapi_3)",
                other
            )),
        }
    }
}

/// A dialect-level defect reported by a converter.
///
/// Locations follow the same addressing convention as the structural
/// validator, so the scrub engine can act on them directly.
#[derive(Debug, Clone, PartialEq)]
pub struct DialectError {
    /// Converter-defined rule code.
    pub code: String,
    /// Where the rule fired.
    pub path: JsonPath,
}

/// A source normalized into the canonical dialect.
pub trait ConvertedSpec {
    /// The normalized document tree.
    fn document(&self) -> &Value;

    /// Dialect-deep validation performed by the converter itself.
    fn validate(&self) -> CoreResult<Vec<DialectError>>;

    /// Serializes the normalized document as indented JSON text.
    fn stringify(&self) -> CoreResult<String>;
}

/// Normalizes API description sources between dialects.
///
/// The core treats implementations as opaque: conversion failures propagate
/// unchanged through the fatal channel and are never reinterpreted as
/// document defects.
pub trait Converter {
    /// The normalized-spec handle produced by this converter.
    type Spec: ConvertedSpec;

    /// Converts `source` text from dialect `from` into dialect `to`.
    fn convert(&self, from: Dialect, to: Dialect, source: &str) -> CoreResult<Self::Spec>;
}

/// Built-in converter for sources already in the canonical dialect.
///
/// Parses JSON or YAML text into a document tree and reports no dialect
/// errors of its own; cross-dialect requests are refused, since real
/// conversion is an external capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

/// The normalized spec handle produced by [`IdentityConverter`].
#[derive(Debug, Clone)]
pub struct IdentitySpec {
    document: Value,
}

impl ConvertedSpec for IdentitySpec {
    fn document(&self) -> &Value {
        &self.document
    }

    fn validate(&self) -> CoreResult<Vec<DialectError>> {
        Ok(Vec::new())
    }

    fn stringify(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}

impl Converter for IdentityConverter {
    type Spec = IdentitySpec;

    fn convert(&self, from: Dialect, to: Dialect, source: &str) -> CoreResult<IdentitySpec> {
        if from != to {
            return Err(CoreError::General(format!(
                "conversion from '{}' to '{}' requires an external converter",
                from, to
            )));
        }
        // serde_yaml accepts JSON as well; preserve_order keeps declaration
        // order through the round trip.
        let document: Value = serde_yaml::from_str(source)?;
        Ok(IdentitySpec { document })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identity_parses_json() {
        let spec = IdentityConverter
            .convert(Dialect::Swagger2, Dialect::Swagger2, r#"{"swagger": "2.0"}"#)
            .unwrap();
        assert_eq!(spec.document(), &json!({ "swagger": "2.0" }));
    }

    #[test]
    fn test_identity_parses_yaml() {
        let spec = IdentityConverter
            .convert(Dialect::Swagger2, Dialect::Swagger2, "swagger: '2.0'\npaths: {}\n")
            .unwrap();
        assert_eq!(spec.document(), &json!({ "swagger": "2.0", "paths": {} }));
    }

    #[test]
    fn test_identity_refuses_cross_dialect_requests() {
        let result = IdentityConverter.convert(Dialect::OpenApi3, Dialect::Swagger2, "{}");
        assert!(matches!(result, Err(CoreError::General(_))));
    }

    #[test]
    fn test_identity_reports_no_dialect_errors() {
        let spec = IdentityConverter
            .convert(Dialect::Swagger2, Dialect::Swagger2, "{}")
            .unwrap();
        assert!(spec.validate().unwrap().is_empty());
    }

    #[test]
    fn test_dialect_round_trips_through_names() {
        for dialect in [Dialect::Swagger1, Dialect::Swagger2, Dialect::OpenApi3] {
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
        }
        assert!("swagger_4".parse::<Dialect>().is_err());
    }
}
