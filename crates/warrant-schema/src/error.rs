//! Error types for schema reading and schema definition
//!
//! Reading never panics: every rejected input becomes a [`SchemaError`] value.
//! Mistakes in how a schema is put together (a bad struct field descriptor, a
//! default the schema itself rejects) are reported as [`DefinitionError`] at
//! the moment the schema is built.
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Value of the `name` field of every serialized [`SchemaError`]
pub const SCHEMA_ERROR_NAME: &str = "SchemaError";

/// What went wrong while reading a value
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Failure raised by a custom reader through [`error`]
    Custom,
    /// Wrong runtime kind
    TypeMismatch { expected: String, actual: String },
    /// Right kind, but not the expected literal
    LiteralMismatch { expected: String, actual: String },
    /// Right kind, but a refinement (comparison, prefix, pattern) rejected it
    Constraint,
    /// Fixed-length sequence of the wrong length
    Length { expected: usize, actual: usize },
    /// A positional element failed; the element error is the cause
    InvalidElement { at: usize },
    /// A named field or dictionary entry failed; the member error is the cause
    InvalidField { at: String },
    /// No member of a union accepted the value
    Union { causes: Vec<SchemaError> },
    /// At least one member of an intersection rejected the value
    Intersection { causes: Vec<SchemaError> },
}

/// Coarse classification of read failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    TypeMismatch,
    ValueMismatch,
    Structural,
    Custom,
}

/// The failure value produced by a schema read
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct SchemaError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<Box<SchemaError>>,
    context: BTreeMap<String, serde_json::Value>,
    stack: String,
}

/// Create a custom read failure carrying `message`
#[track_caller]
pub fn error(message: impl Into<String>) -> SchemaError {
    SchemaError::new(message)
}

impl SchemaError {
    /// Create a custom read failure
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Custom, message.into(), None)
    }

    /// The input has the wrong runtime kind
    #[track_caller]
    pub fn type_mismatch(expected: impl Into<String>, actual: &Value) -> Self {
        let expected = expected.into();
        let actual = actual.describe();
        let message = format!("Expected value of type {} instead got {}", expected, actual);
        Self::build(ErrorKind::TypeMismatch { expected, actual }, message, None)
    }

    /// The input is not the expected literal
    #[track_caller]
    pub fn literal_mismatch(expected: &Value, actual: &Value) -> Self {
        let expected = expected.describe();
        let actual = actual.describe();
        let message = format!("Expected literal {} instead got {}", expected, actual);
        Self::build(ErrorKind::LiteralMismatch { expected, actual }, message, None)
    }

    /// A refinement rejected an otherwise well-typed input
    #[track_caller]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Constraint, message.into(), None)
    }

    /// A fixed-length sequence has the wrong number of elements
    #[track_caller]
    pub fn length(expected: usize, actual: usize) -> Self {
        let message = format!("Array must contain exactly {} elements", expected);
        Self::build(ErrorKind::Length { expected, actual }, message, None)
    }

    /// Element `at` of a sequence failed with `cause`
    #[track_caller]
    pub fn invalid_element(at: usize, cause: SchemaError) -> Self {
        let message = format!(
            "Array contains invalid element at {}:\n\n{}",
            at,
            list_item(&cause.message)
        );
        Self::build(ErrorKind::InvalidElement { at }, message, Some(cause))
    }

    /// Field `at` of an object failed with `cause`
    #[track_caller]
    pub fn invalid_field(at: impl Into<String>, cause: SchemaError) -> Self {
        let at = at.into();
        let message = format!(
            "Object contains invalid field \"{}\":\n\n{}",
            at,
            list_item(&cause.message)
        );
        Self::build(ErrorKind::InvalidField { at }, message, Some(cause))
    }

    /// None of the union members accepted the value
    #[track_caller]
    pub fn union(causes: Vec<SchemaError>) -> Self {
        let message = format!(
            "Value does not match any type of the union:\n{}",
            list(&causes)
        );
        Self::build(ErrorKind::Union { causes }, message, None)
    }

    /// Some intersection members rejected the value
    #[track_caller]
    pub fn intersection(causes: Vec<SchemaError>) -> Self {
        let message = format!(
            "Value does not conform to all types of the intersection:\n{}",
            list(&causes)
        );
        Self::build(ErrorKind::Intersection { causes }, message, None)
    }

    #[track_caller]
    fn build(kind: ErrorKind, message: String, cause: Option<SchemaError>) -> Self {
        let location = Location::caller();
        let stack = format!(
            "{}: {}\n    at {}:{}:{}",
            SCHEMA_ERROR_NAME,
            message,
            location.file(),
            location.line(),
            location.column()
        );
        Self {
            kind,
            message,
            cause: cause.map(Box::new),
            context: BTreeMap::new(),
            stack,
        }
    }

    /// Attach a domain field that is carried into the serialized form
    pub fn with_context<K: Into<String>>(mut self, key: K, value: serde_json::Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &'static str {
        SCHEMA_ERROR_NAME
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Full human-readable message, including nested context
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The nested failure for element and field errors
    pub fn cause(&self) -> Option<&SchemaError> {
        self.cause.as_deref()
    }

    pub fn context(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.context
    }

    /// Diagnostic trace: the message followed by the construction site
    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            ErrorKind::Custom => ErrorCategory::Custom,
            ErrorKind::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            ErrorKind::LiteralMismatch { .. } | ErrorKind::Constraint => {
                ErrorCategory::ValueMismatch
            }
            ErrorKind::Length { .. }
            | ErrorKind::InvalidElement { .. }
            | ErrorKind::InvalidField { .. }
            | ErrorKind::Union { .. }
            | ErrorKind::Intersection { .. } => ErrorCategory::Structural,
        }
    }

    /// Plain JSON form: `{name, error, message, stack}` plus `cause` and any
    /// attached context fields
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.context {
            map.insert(key.clone(), value.clone());
        }
        map.insert("name".into(), SCHEMA_ERROR_NAME.into());
        map.insert("error".into(), true.into());
        map.insert("message".into(), self.message.clone().into());
        map.insert("stack".into(), self.stack.clone().into());
        if let Some(cause) = &self.cause {
            map.insert("cause".into(), cause.to_json());
        }
        serde_json::Value::Object(map)
    }
}

impl Serialize for SchemaError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn indent(message: &str) -> String {
    format!("  {}", message.replace('\n', "\n  "))
}

fn list_item(message: &str) -> String {
    indent(&format!("- {}", message))
}

fn list(causes: &[SchemaError]) -> String {
    causes
        .iter()
        .map(|cause| list_item(&cause.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A schema was put together incorrectly
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// A struct field descriptor is neither a schema nor a scalar literal
    #[error("Invalid struct field \"{name}\", expected schema or literal, instead got {kind}")]
    InvalidField { name: String, kind: String },

    /// The schema rejects its own default value
    #[error("{0}")]
    InvalidDefault(#[source] SchemaError),

    /// A default would read back as `undefined`
    #[error("undefined is not a valid default")]
    UndefinedDefault,
}

/// Main error type for fallible operations that are not plain reads
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// A value the schema accepted does not deserialize into the requested type
    #[error("Failed to decode validated value: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Convenience alias for results using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Read failures collected while reading a batch of inputs
#[derive(Debug, Clone, Default, PartialEq, Error)]
pub struct SchemaErrors {
    errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiple schema errors occurred:")?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl SchemaErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaError> {
        self.errors.iter()
    }

    /// Ok if nothing was collected
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Serialize for SchemaErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.errors.serialize(serializer)
    }
}

impl From<SchemaError> for SchemaErrors {
    fn from(error: SchemaError) -> Self {
        Self { errors: vec![error] }
    }
}

impl From<Vec<SchemaError>> for SchemaErrors {
    fn from(errors: Vec<SchemaError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_serializes_to_plain_mapping() {
        let err = error("boom!");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["name"], "SchemaError");
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "boom!");
        assert_eq!(json["stack"], err.stack());
        assert!(json.get("cause").is_none());
    }

    #[test]
    fn test_stack_records_construction_site() {
        let err = SchemaError::new("boom!");
        assert!(err.stack().starts_with("SchemaError: boom!\n    at "));
        assert!(err.stack().contains("error.rs"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = SchemaError::invalid_field("x", error("inner"));
        let as_std: &dyn std::error::Error = &err;
        assert_eq!(as_std.source().map(|s| s.to_string()), Some("inner".to_string()));
    }

    #[test]
    fn test_nested_messages_are_indented() {
        let inner = SchemaError::type_mismatch("integer", &Value::from(1.5));
        let err = SchemaError::invalid_element(2, SchemaError::invalid_field("y", inner));
        assert_eq!(
            err.to_string(),
            "Array contains invalid element at 2:\n\n  - Object contains invalid field \"y\":\n  \n    - Expected value of type integer instead got 1.5"
        );
    }

    #[test]
    fn test_context_fields_are_serialized() {
        let err = error("denied").with_context(
            "capability",
            json!({"can": "store/add", "with": "did:key:alice"}),
        );
        let json = err.to_json();
        assert_eq!(json["capability"]["can"], "store/add");
        assert_eq!(json["name"], "SchemaError");
    }

    #[test]
    fn test_reserved_fields_win_over_context() {
        let err = error("real").with_context("message", json!("fake"));
        assert_eq!(err.to_json()["message"], "real");
    }

    #[test]
    fn test_cause_is_serialized() {
        let err = SchemaError::invalid_field("x", error("inner"));
        assert_eq!(err.to_json()["cause"]["message"], "inner");
        assert_eq!(err.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            SchemaError::type_mismatch("string", &Value::Null).category(),
            ErrorCategory::TypeMismatch
        );
        assert_eq!(
            SchemaError::literal_mismatch(&Value::from("a"), &Value::from("b")).category(),
            ErrorCategory::ValueMismatch
        );
        assert_eq!(SchemaError::length(2, 3).category(), ErrorCategory::Structural);
        assert_eq!(error("x").category(), ErrorCategory::Custom);
    }

    #[test]
    fn test_schema_errors_display() {
        let mut errors = SchemaErrors::new();
        assert!(errors.clone().into_result().is_ok());
        errors.add(error("first"));
        errors.add(error("second"));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "Multiple schema errors occurred:\n1. first\n2. second"
        );
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_definition_error_messages() {
        let err = DefinitionError::InvalidField {
            name: "toString".into(),
            kind: "array".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid struct field \"toString\", expected schema or literal, instead got array"
        );
        let err = DefinitionError::InvalidDefault(error("Expected literal \"foo\" instead got \"bar\""));
        assert_eq!(err.to_string(), "Expected literal \"foo\" instead got \"bar\"");
    }
}
