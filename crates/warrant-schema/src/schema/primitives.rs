//! Primitive schemas, literals, enumerations and value refinements
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use super::{Kind, Schema};
use crate::error::{DefinitionError, SchemaError};
use crate::value::{format_number, Value};
use regex::Regex;

/// Rejects every input
pub fn never() -> Schema {
    Schema::from_kind(Kind::Never)
}

/// Accepts every input, `undefined` included, unchanged
pub fn unknown() -> Schema {
    Schema::from_kind(Kind::Unknown)
}

pub fn boolean() -> Schema {
    Schema::from_kind(Kind::Boolean)
}

/// Any number, including `NaN` and the infinities
pub fn number() -> NumberSchema {
    NumberSchema::of(Kind::Number)
}

/// Finite numbers without a fractional part
pub fn integer() -> NumberSchema {
    NumberSchema::of(Kind::Integer)
}

/// Finite numbers
pub fn float() -> NumberSchema {
    NumberSchema::of(Kind::Float)
}

pub fn string() -> StringSchema {
    StringSchema {
        schema: Schema::from_kind(Kind::String),
    }
}

/// Accepts exactly `value`
pub fn literal(value: impl Into<Value>) -> LiteralSchema {
    let value = value.into();
    LiteralSchema {
        schema: Schema::from_kind(Kind::Literal(value.clone())),
        value,
    }
}

/// Accepts strings that are one of `variants`
pub fn enumeration<I, S>(variants: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Schema::from_kind(Kind::Enum(variants.into_iter().map(Into::into).collect()))
}

/// Refinement accepting strings that start with `prefix`
pub fn starts_with(prefix: impl Into<String>) -> Schema {
    Schema::from_kind(Kind::StartsWith(prefix.into()))
}

/// Refinement accepting strings that end with `suffix`
pub fn ends_with(suffix: impl Into<String>) -> Schema {
    Schema::from_kind(Kind::EndsWith(suffix.into()))
}

/// Refinement accepting numbers strictly greater than `bound`
pub fn greater_than(bound: impl Into<f64>) -> Schema {
    Schema::from_kind(Kind::GreaterThan(bound.into()))
}

/// Refinement accepting numbers strictly less than `bound`
pub fn less_than(bound: impl Into<f64>) -> Schema {
    Schema::from_kind(Kind::LessThan(bound.into()))
}

/// Refinement accepting strings `pattern` matches
pub fn matches(pattern: Regex) -> Schema {
    Schema::from_kind(Kind::Pattern(pattern))
}

/// Numeric schema with range refinements
#[derive(Clone)]
pub struct NumberSchema {
    schema: Schema,
}

schema_view!(NumberSchema);

impl NumberSchema {
    fn of(kind: Kind) -> Self {
        Self {
            schema: Schema::from_kind(kind),
        }
    }

    pub fn greater_than(&self, bound: impl Into<f64>) -> NumberSchema {
        self.refine(greater_than(bound))
    }

    pub fn less_than(&self, bound: impl Into<f64>) -> NumberSchema {
        self.refine(less_than(bound))
    }

    /// Chain `next` after this schema, keeping the numeric refinements available
    pub fn refine(&self, next: impl Into<Schema>) -> NumberSchema {
        NumberSchema {
            schema: self.schema.refine(next),
        }
    }
}

/// String schema with affix and pattern refinements
#[derive(Clone)]
pub struct StringSchema {
    schema: Schema,
}

schema_view!(StringSchema);

impl StringSchema {
    pub fn starts_with(&self, prefix: impl Into<String>) -> StringSchema {
        self.refine(starts_with(prefix))
    }

    pub fn ends_with(&self, suffix: impl Into<String>) -> StringSchema {
        self.refine(ends_with(suffix))
    }

    pub fn matches(&self, pattern: Regex) -> StringSchema {
        self.refine(matches(pattern))
    }

    pub fn refine(&self, next: impl Into<Schema>) -> StringSchema {
        StringSchema {
            schema: self.schema.refine(next),
        }
    }
}

/// Schema for a single literal value
#[derive(Clone)]
pub struct LiteralSchema {
    schema: Schema,
    value: Value,
}

schema_view!(LiteralSchema);

impl LiteralSchema {
    /// The accepted value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// This literal with itself as the default, so a missing value reads as
    /// the literal. Fails for `literal(Value::Undefined)`.
    pub fn defaulted(&self) -> Result<Schema, DefinitionError> {
        self.schema.default(self.value.clone())
    }
}

pub(super) fn read_boolean(input: &Value) -> Result<Value, SchemaError> {
    match input {
        Value::Bool(_) => Ok(input.clone()),
        _ => Err(SchemaError::type_mismatch("boolean", input)),
    }
}

pub(super) fn read_number(input: &Value) -> Result<Value, SchemaError> {
    match input {
        Value::Number(_) => Ok(input.clone()),
        _ => Err(SchemaError::type_mismatch("number", input)),
    }
}

pub(super) fn read_integer(input: &Value) -> Result<Value, SchemaError> {
    match input {
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Ok(input.clone()),
        Value::Number(_) => Err(SchemaError::type_mismatch("integer", input)),
        _ => Err(SchemaError::type_mismatch("number", input)),
    }
}

pub(super) fn read_float(input: &Value) -> Result<Value, SchemaError> {
    match input {
        Value::Number(n) if n.is_finite() => Ok(input.clone()),
        Value::Number(_) => Err(SchemaError::type_mismatch("float", input)),
        _ => Err(SchemaError::type_mismatch("number", input)),
    }
}

pub(super) fn read_string(input: &Value) -> Result<Value, SchemaError> {
    match input {
        Value::String(_) => Ok(input.clone()),
        _ => Err(SchemaError::type_mismatch("string", input)),
    }
}

pub(super) fn read_literal(expected: &Value, input: &Value) -> Result<Value, SchemaError> {
    if expected.same_value(input) {
        Ok(expected.clone())
    } else {
        Err(SchemaError::literal_mismatch(expected, input))
    }
}

pub(super) fn read_enum(variants: &[String], input: &Value) -> Result<Value, SchemaError> {
    match input {
        Value::String(s) if variants.iter().any(|variant| variant == s) => Ok(input.clone()),
        _ => Err(SchemaError::type_mismatch(variants.join("|"), input)),
    }
}

fn expect_string(input: &Value) -> Result<&str, SchemaError> {
    input
        .as_str()
        .ok_or_else(|| SchemaError::type_mismatch("string", input))
}

fn expect_number(input: &Value) -> Result<f64, SchemaError> {
    input
        .as_f64()
        .ok_or_else(|| SchemaError::type_mismatch("number", input))
}

pub(super) fn read_starts_with(prefix: &str, input: &Value) -> Result<Value, SchemaError> {
    let s = expect_string(input)?;
    if s.starts_with(prefix) {
        Ok(input.clone())
    } else {
        Err(SchemaError::constraint(format!(
            "Expect string to start with \"{}\" instead got \"{}\"",
            prefix, s
        )))
    }
}

pub(super) fn read_ends_with(suffix: &str, input: &Value) -> Result<Value, SchemaError> {
    let s = expect_string(input)?;
    if s.ends_with(suffix) {
        Ok(input.clone())
    } else {
        Err(SchemaError::constraint(format!(
            "Expect string to end with \"{}\" instead got \"{}\"",
            suffix, s
        )))
    }
}

pub(super) fn read_greater_than(bound: f64, input: &Value) -> Result<Value, SchemaError> {
    let n = expect_number(input)?;
    if n > bound {
        Ok(input.clone())
    } else {
        Err(SchemaError::constraint(format!(
            "Expected {} > {}",
            format_number(n),
            format_number(bound)
        )))
    }
}

pub(super) fn read_less_than(bound: f64, input: &Value) -> Result<Value, SchemaError> {
    let n = expect_number(input)?;
    if n < bound {
        Ok(input.clone())
    } else {
        Err(SchemaError::constraint(format!(
            "Expected {} < {}",
            format_number(n),
            format_number(bound)
        )))
    }
}

pub(super) fn read_pattern(pattern: &Regex, input: &Value) -> Result<Value, SchemaError> {
    let s = expect_string(input)?;
    if pattern.is_match(s) {
        Ok(input.clone())
    } else {
        Err(SchemaError::constraint(format!(
            "Expected to match /{}/ but got \"{}\" instead",
            pattern.as_str(),
            s
        )))
    }
}
