//! Schema handle, the shared read contract and combinator expressions
//!
//! A [`Schema`] is an immutable, cheaply clonable handle over a tagged
//! [`Kind`]. Every schema, whether primitive, composite, combinator or
//! extension, is read through the same [`Schema::read`] dispatch, and every
//! schema renders back to the combinator expression that built it.
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

/// Deref, conversion and formatting glue for typed views over a `Schema`.
/// The view type must keep its handle in a field named `schema`.
macro_rules! schema_view {
    ($view:ident) => {
        impl ::std::ops::Deref for $view {
            type Target = $crate::schema::Schema;

            fn deref(&self) -> &$crate::schema::Schema {
                &self.schema
            }
        }

        impl From<$view> for $crate::schema::Schema {
            fn from(view: $view) -> Self {
                view.schema
            }
        }

        impl From<&$view> for $crate::schema::Schema {
            fn from(view: &$view) -> Self {
                view.schema.clone()
            }
        }

        impl From<$view> for $crate::schema::Field {
            fn from(view: $view) -> Self {
                $crate::schema::Field::Schema(view.schema)
            }
        }

        impl ::std::fmt::Display for $view {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.schema, f)
            }
        }

        impl ::std::fmt::Debug for $view {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.schema, f)
            }
        }
    };
}

mod brand;
mod combinators;
mod composites;
mod extension;
mod primitives;

pub use brand::{Branded, BrandedSchema};
pub use composites::{
    array, dictionary, result, structure, tuple, ArraySchema, DictionarySchema, Field,
    ResultSchema, StructSchema,
};
pub use extension::{Extension, Narrow, NarrowWith};
pub use primitives::{
    boolean, ends_with, enumeration, float, greater_than, integer, less_than, literal, matches,
    never, number, starts_with, string, unknown, LiteralSchema, NumberSchema, StringSchema,
};

use crate::error::{Result as CrateResult, SchemaError};
use crate::value::{format_number, quote, Value};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// The shape a schema checks for
#[non_exhaustive]
pub enum Kind {
    Never,
    Unknown,
    Boolean,
    Number,
    Integer,
    Float,
    String,
    Literal(Value),
    Enum(Vec<String>),
    Array(Schema),
    Tuple(Vec<Schema>),
    Dictionary { key: Schema, value: Schema },
    Struct(Arc<Vec<(String, Schema)>>),
    Result { ok: Schema, error: Schema },
    Optional(Schema),
    Nullable(Schema),
    Default { schema: Schema, value: Value },
    Refine { base: Schema, refinement: Schema },
    Union(Vec<Schema>),
    Intersection(Vec<Schema>),
    StartsWith(String),
    EndsWith(String),
    GreaterThan(f64),
    LessThan(f64),
    Pattern(Regex),
    Extension(Extension),
}

/// A composable validator narrowing a [`Value`] into a conforming [`Value`]
#[derive(Clone)]
pub struct Schema {
    kind: Arc<Kind>,
}

impl Schema {
    pub(crate) fn from_kind(kind: Kind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }

    /// What this schema checks for
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Whether both handles point at the same schema instance
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.kind, &other.kind)
    }

    /// Narrow `input`, returning the conforming value or the reason it does not
    /// conform. Never panics.
    pub fn read(&self, input: &Value) -> Result<Value, SchemaError> {
        match self.kind.as_ref() {
            Kind::Never => Err(SchemaError::type_mismatch("never", input)),
            Kind::Unknown => Ok(input.clone()),
            Kind::Boolean => primitives::read_boolean(input),
            Kind::Number => primitives::read_number(input),
            Kind::Integer => primitives::read_integer(input),
            Kind::Float => primitives::read_float(input),
            Kind::String => primitives::read_string(input),
            Kind::Literal(expected) => primitives::read_literal(expected, input),
            Kind::Enum(variants) => primitives::read_enum(variants, input),
            Kind::StartsWith(prefix) => primitives::read_starts_with(prefix, input),
            Kind::EndsWith(suffix) => primitives::read_ends_with(suffix, input),
            Kind::GreaterThan(bound) => primitives::read_greater_than(*bound, input),
            Kind::LessThan(bound) => primitives::read_less_than(*bound, input),
            Kind::Pattern(pattern) => primitives::read_pattern(pattern, input),
            Kind::Array(element) => composites::read_array(element, input),
            Kind::Tuple(elements) => composites::read_tuple(elements, input),
            Kind::Dictionary { key, value } => composites::read_dictionary(key, value, input),
            Kind::Struct(fields) => composites::read_struct(fields, input),
            Kind::Result { ok, error } => composites::read_result(ok, error, input),
            Kind::Optional(schema) => combinators::read_optional(schema, input),
            Kind::Nullable(schema) => combinators::read_nullable(schema, input),
            Kind::Default { schema, value } => combinators::read_default(schema, value, input),
            Kind::Refine { base, refinement } => {
                combinators::read_refine(base, refinement, input)
            }
            Kind::Union(members) => combinators::read_union(members, input),
            Kind::Intersection(members) => combinators::read_intersection(members, input),
            Kind::Extension(extension) => extension.read(input),
        }
    }

    /// Convert `input` and read it, for use with `?` at trust boundaries
    pub fn from(&self, input: impl Into<Value>) -> Result<Value, SchemaError> {
        let input = input.into();
        self.read(&input).map_err(|err| {
            tracing::trace!(schema = %self, error = %err, "schema rejected input");
            err
        })
    }

    /// Whether `input` conforms
    pub fn is(&self, input: &Value) -> bool {
        self.read(input).is_ok()
    }

    /// Read `input` and deserialize the conforming value into `T`
    pub fn decode<T: DeserializeOwned>(&self, input: &Value) -> CrateResult<T> {
        let value = self.read(input)?;
        Ok(serde_json::from_value(value.to_json())?)
    }
}

impl From<&Schema> for Schema {
    fn from(schema: &Schema) -> Self {
        schema.clone()
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, schemas: &[Schema]) -> fmt::Result {
    for (i, schema) in schemas.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", schema)?;
    }
    Ok(())
}

fn write_chain(f: &mut fmt::Formatter<'_>, members: &[Schema], method: &str) -> fmt::Result {
    let mut iter = members.iter();
    if let Some(first) = iter.next() {
        write!(f, "{}", first)?;
    }
    for member in iter {
        write!(f, ".{}({})", method, member)?;
    }
    Ok(())
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.as_ref() {
            Kind::Never => f.write_str("never()"),
            Kind::Unknown => f.write_str("unknown()"),
            Kind::Boolean => f.write_str("boolean()"),
            Kind::Number => f.write_str("number()"),
            Kind::Integer => f.write_str("integer()"),
            Kind::Float => f.write_str("float()"),
            Kind::String => f.write_str("string()"),
            Kind::Literal(value) => write!(f, "literal({})", value),
            Kind::Enum(variants) => f.write_str(&variants.join("|")),
            Kind::Array(element) => write!(f, "array({})", element),
            Kind::Tuple(elements) => {
                f.write_str("tuple([")?;
                write_list(f, elements)?;
                f.write_str("])")
            }
            Kind::Dictionary { key, value } => {
                write!(f, "dictionary({{ key: {}, value: {} }})", key, value)
            }
            Kind::Struct(fields) if fields.is_empty() => f.write_str("struct({})"),
            Kind::Struct(fields) => {
                f.write_str("struct({ ")?;
                for (i, (name, schema)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, schema)?;
                }
                f.write_str(" })")
            }
            Kind::Result { ok, error } => write!(f, "result({{ ok: {}, error: {} }})", ok, error),
            Kind::Optional(schema) => write!(f, "{}.optional()", schema),
            Kind::Nullable(schema) => write!(f, "{}.nullable()", schema),
            Kind::Default { schema, value } => write!(f, "{}.default({})", schema, value),
            Kind::Refine { base, refinement } => write!(f, "{}.refine({})", base, refinement),
            Kind::Union(members) => write_chain(f, members, "or"),
            Kind::Intersection(members) => write_chain(f, members, "and"),
            Kind::StartsWith(prefix) => write!(f, "startsWith({})", quote(prefix)),
            Kind::EndsWith(suffix) => write!(f, "endsWith({})", quote(suffix)),
            Kind::GreaterThan(bound) => write!(f, "greaterThan({})", format_number(*bound)),
            Kind::LessThan(bound) => write!(f, "lessThan({})", format_number(*bound)),
            Kind::Pattern(pattern) => write!(f, "matches(/{}/)", pattern.as_str()),
            Kind::Extension(extension) => fmt::Display::fmt(extension, f),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema({})", self)
    }
}
