#![deny(missing_docs)]

//! # Document Validation
//!
//! Recursive structural validator for Swagger 2.0 documents.
//!
//! The walk is pure: it consumes a traversal cursor and produces an ordered
//! `Vec<ValidationError>`. Defects in the document are data; only malformed
//! `$ref` grammar (input outside the supported grammar) aborts the pass
//! through the fatal channel.
//!
//! Traversal order: root checks, then `definitions` entries in declaration
//! order, then `paths` entries → methods → responses → schema subtrees
//! depth-first. Ordering and required-section checks run once per container,
//! before content recursion.

use crate::context::{Context, VisitedSet};
use crate::error::CoreResult;
use crate::path::JsonPath;
use crate::refs::{lookup_json_path, parse_ref};
use crate::schema::SchemaNode;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

/// Version literal the validator accepts at the document root.
pub const SUPPORTED_SWAGGER_VERSION: &str = "2.0";

/// Classification of the structural defects the validator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Top-level version marker absent or not the supported literal.
    MissingSwagger,
    /// `definitions` absent at the root.
    MissingDefinitions,
    /// `paths` absent at the root.
    MissingPaths,
    /// `definitions` keys not in ascending lexical order.
    DefinitionsAlphabetical,
    /// `paths` keys not in ascending lexical order.
    PathsAlphabetical,
    /// A path template repeats a `{name}` placeholder.
    DuplicatePathParameter,
    /// A `{name}` placeholder has no matching `in: path` parameter on a
    /// method.
    PathParameterNotDefined,
    /// An operation declares two or more `in: body` parameters.
    DuplicateBodyParameter,
    /// A response object lacks `description`.
    MissingPathDescription,
    /// A `$ref` resolves to nothing.
    ReferenceNotFound,
}

impl ErrorKind {
    /// Stable rule code, as used by the error report and `--ignore-rule`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingSwagger => "missing-swagger",
            ErrorKind::MissingDefinitions => "missing-definitions",
            ErrorKind::MissingPaths => "missing-paths",
            ErrorKind::DefinitionsAlphabetical => "definitions-alphabetical",
            ErrorKind::PathsAlphabetical => "paths-alphabetical",
            ErrorKind::DuplicatePathParameter => "duplicate-path-parameter",
            ErrorKind::PathParameterNotDefined => "path-parameter-not-defined",
            ErrorKind::DuplicateBodyParameter => "duplicate-body-parameter",
            ErrorKind::MissingPathDescription => "missing-path-description",
            ErrorKind::ReferenceNotFound => "reference-not-found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A structural defect in the document under inspection.
///
/// Validation errors are pure data: they are collected into lists and never
/// raised through the fatal error channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// The rule that fired.
    pub kind: ErrorKind,
    /// Where it fired.
    pub path: JsonPath,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    /// Creates an error of `kind` at `path`.
    pub fn new(kind: ErrorKind, path: JsonPath, message: impl Into<String>) -> Self {
        ValidationError {
            kind,
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validates `document` structurally, producing errors in traversal order.
///
/// The `Err` channel carries only fatal grammar defects (a `$ref` that is
/// not `#`-prefixed); everything repairable comes back as data.
pub fn validate_document(document: &Value) -> CoreResult<Vec<ValidationError>> {
    let mut visited = VisitedSet::default();
    let context = Context::new(document);
    if visited.already_handled(document) {
        return Ok(Vec::new());
    }
    let mut errors = Vec::new();

    if document.get("swagger").and_then(Value::as_str) != Some(SUPPORTED_SWAGGER_VERSION) {
        errors.push(ValidationError::new(
            ErrorKind::MissingSwagger,
            context.path().clone(),
            "No 'swagger' defined in document",
        ));
    }

    match document.get("definitions") {
        None => errors.push(ValidationError::new(
            ErrorKind::MissingDefinitions,
            context.path().clone(),
            "No 'definitions' defined in document",
        )),
        Some(definitions) => {
            if let Some(entries) = definitions.as_object() {
                if !keys_sorted(entries) {
                    errors.push(ValidationError::new(
                        ErrorKind::DefinitionsAlphabetical,
                        JsonPath::from_segments(["definitions"]),
                        "Definitions are not in alphabetical order",
                    ));
                }
                let definitions_context = context.descend("definitions", document);
                for (name, schema) in entries {
                    errors.extend(validate_schema(
                        schema,
                        &definitions_context.at(name.as_str()),
                        &mut visited,
                    )?);
                }
            }
        }
    }

    match document.get("paths") {
        None => errors.push(ValidationError::new(
            ErrorKind::MissingPaths,
            context.path().clone(),
            "No 'paths' defined in document",
        )),
        Some(paths) => {
            if let Some(entries) = paths.as_object() {
                if !keys_sorted(entries) {
                    errors.push(ValidationError::new(
                        ErrorKind::PathsAlphabetical,
                        JsonPath::from_segments(["paths"]),
                        "Paths are not in alphabetical order",
                    ));
                }
                let paths_context = context.descend("paths", document);
                for (template, content) in entries {
                    errors.extend(validate_path_entry(
                        template,
                        content,
                        &paths_context.at(template.as_str()),
                        &mut visited,
                    )?);
                }
            }
        }
    }

    Ok(errors)
}

/// Extracts `{name}` placeholder names from a path template, in order.
pub fn template_parameters(template: &str) -> Vec<String> {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    let placeholder_re =
        PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("Invalid regex"));
    placeholder_re
        .captures_iter(template)
        .map(|capture| capture[1].to_string())
        .collect()
}

fn keys_sorted(entries: &Map<String, Value>) -> bool {
    entries
        .keys()
        .zip(entries.keys().skip(1))
        .all(|(previous, next)| previous <= next)
}

fn has_duplicates(names: &[String]) -> bool {
    let mut seen = HashSet::new();
    names.iter().any(|name| !seen.insert(name.as_str()))
}

fn declares_path_parameter(operation: &Value, name: &str) -> bool {
    operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(|parameters| {
            parameters.iter().any(|parameter| {
                parameter.get("in").and_then(Value::as_str) == Some("path")
                    && parameter.get("name").and_then(Value::as_str) == Some(name)
            })
        })
        .unwrap_or(false)
}

fn validate_path_entry(
    template: &str,
    content: &Value,
    context: &Context<'_>,
    visited: &mut VisitedSet,
) -> CoreResult<Vec<ValidationError>> {
    if visited.already_handled(content) {
        return Ok(Vec::new());
    }
    let mut errors = Vec::new();

    let placeholders = template_parameters(template);
    if has_duplicates(&placeholders) {
        errors.push(ValidationError::new(
            ErrorKind::DuplicatePathParameter,
            context.path().clone(),
            format!("Duplicate path parameters ({:?})", placeholders),
        ));
    }

    let Some(methods) = content.as_object() else {
        return Ok(errors);
    };
    for (method, operation) in methods {
        for placeholder in &placeholders {
            if !declares_path_parameter(operation, placeholder) {
                errors.push(ValidationError::new(
                    ErrorKind::PathParameterNotDefined,
                    context.path().child(method.as_str()).child("parameters"),
                    format!(
                        "Path references to parameter '{}', but it is not defined as a parameter in '{}' method.",
                        placeholder, method
                    ),
                ));
            }
        }
        errors.extend(validate_method(
            operation,
            &context.descend(method.as_str(), content),
            visited,
        )?);
    }
    Ok(errors)
}

fn validate_method(
    operation: &Value,
    context: &Context<'_>,
    visited: &mut VisitedSet,
) -> CoreResult<Vec<ValidationError>> {
    if visited.already_handled(operation) {
        return Ok(Vec::new());
    }
    let mut errors = Vec::new();

    let body_parameters = operation
        .get("parameters")
        .and_then(Value::as_array)
        .map(|parameters| {
            parameters
                .iter()
                .filter(|parameter| parameter.get("in").and_then(Value::as_str) == Some("body"))
                .count()
        })
        .unwrap_or(0);
    if body_parameters > 1 {
        errors.push(ValidationError::new(
            ErrorKind::DuplicateBodyParameter,
            context.path().child("parameters"),
            format!(
                "Operation declares {} parameters with 'in: body', at most one is allowed",
                body_parameters
            ),
        ));
    }

    if let Some(responses) = operation.get("responses") {
        if let Some(entries) = responses.as_object() {
            let responses_context = context.descend("responses", operation);
            for (code, response) in entries {
                errors.extend(validate_response(
                    response,
                    &responses_context.descend(code.as_str(), responses),
                    visited,
                )?);
            }
        }
    }
    Ok(errors)
}

fn validate_response(
    response: &Value,
    context: &Context<'_>,
    visited: &mut VisitedSet,
) -> CoreResult<Vec<ValidationError>> {
    if visited.already_handled(response) {
        return Ok(Vec::new());
    }
    let mut errors = Vec::new();

    if response.get("description").is_none() {
        errors.push(ValidationError::new(
            ErrorKind::MissingPathDescription,
            context.path().child("description"),
            "No 'description' field was defined for response",
        ));
    }

    if let Some(schema) = response.get("schema") {
        errors.extend(validate_schema(
            schema,
            &context.descend("schema", response),
            visited,
        )?);
    }
    Ok(errors)
}

fn validate_schema(
    value: &Value,
    context: &Context<'_>,
    visited: &mut VisitedSet,
) -> CoreResult<Vec<ValidationError>> {
    if visited.already_handled(value) {
        return Ok(Vec::new());
    }
    match SchemaNode::classify(value) {
        SchemaNode::Scalar => Ok(Vec::new()),
        SchemaNode::Array(items) => {
            let mut errors = Vec::new();
            for (index, item) in items.iter().enumerate() {
                errors.extend(validate_schema(item, &context.at(index.to_string()), visited)?);
            }
            Ok(errors)
        }
        SchemaNode::Reference(reference) => {
            if context.on_stack(value) {
                return Ok(Vec::new());
            }
            let target_path = parse_ref(reference)?;
            match lookup_json_path(context.root(), &target_path) {
                None => Ok(vec![ValidationError::new(
                    ErrorKind::ReferenceNotFound,
                    context.path().clone(),
                    format!("Reference '{}' not found", reference),
                )]),
                // Recursion continues at the resolved location, so defects
                // inside a referenced definition implicate the definition
                // that owns them. The reference-not-found case above stays
                // at the referencing location.
                Some(target) => validate_schema(target, &context.rebased(target_path, value), visited),
            }
        }
        SchemaNode::Object(entries) => {
            if context.on_stack(value) {
                return Ok(Vec::new());
            }
            let mut errors = Vec::new();
            for (key, child) in entries {
                errors.extend(validate_schema(child, &context.descend(key.as_str(), value), visited)?);
            }
            Ok(errors)
        }
    }
}
