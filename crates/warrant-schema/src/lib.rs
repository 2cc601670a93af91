//! Warrant Schema - composable validators for capability arguments
//!
//! This crate provides the schema combinators used to check untrusted values
//! crossing a trust boundary: capability caveats, invocation arguments and
//! service payloads. A schema *reads* a dynamically typed [`Value`] and either
//! returns a conforming value (possibly normalized, e.g. with defaults filled
//! in) or a [`SchemaError`] explaining the rejection.
//!
//! ## Features
//!
//! - **Primitives**: `never`, `unknown`, `boolean`, `number`, `integer`, `float`,
//!   `string`, literals and string enumerations
//! - **Composites**: arrays, tuples, dictionaries, structs and `ok`/`error` results
//! - **Combinators**: `optional`, `nullable`, `default`, `refine`, `or`, `and`
//!   and nominal `brand`ing
//! - **Refinements**: string prefix/suffix/pattern checks and numeric bounds
//! - **Extensions**: user-defined readers via [`Narrow`] and [`NarrowWith`]
//! - **Formats**: URIs and DIDs
//! - **Batch Processing**: reading many inputs against one schema
//!
//! ## Quick Start
//!
//! ```rust
//! use warrant_schema::{fields, integer, string, structure, Value};
//!
//! let point = structure(fields! {
//!     "type" => "Point",
//!     "x" => integer(),
//!     "y" => integer().default(0).unwrap(),
//!     "label" => string().optional(),
//! })
//! .unwrap();
//!
//! let input: Value = serde_json::json!({ "type": "Point", "x": 1 }).into();
//! let output = point.read(&input).unwrap();
//! assert_eq!(output.get("y"), &Value::from(0));
//!
//! let err = point.read(&Value::from("Point")).unwrap_err();
//! assert_eq!(err.to_string(), "Expected value of type object instead got \"Point\"");
//! ```
//!
//! Every schema renders back to the expression that built it:
//!
//! ```rust
//! use warrant_schema::{integer, string};
//!
//! let schema = string().or(integer().greater_than(0)).optional();
//! assert_eq!(
//!     schema.to_string(),
//!     "string().or(integer().refine(greaterThan(0))).optional()"
//! );
//! ```
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

pub mod batch;
pub mod error;
pub mod formats;
pub mod schema;
pub mod value;

// Re-export commonly used types for convenience
pub use batch::{read_batch, BatchConfig};
pub use error::{
    error, DefinitionError, Error, ErrorCategory, ErrorKind, Result, SchemaError, SchemaErrors,
};
pub use formats::{did, did_method, uri, uri_with, UriOptions};
pub use schema::{
    array, boolean, dictionary, ends_with, enumeration, float, greater_than, integer, less_than,
    literal, matches, never, number, result, starts_with, string, structure, tuple, unknown,
    ArraySchema, Branded, BrandedSchema, DictionarySchema, Field, Kind, LiteralSchema, Narrow,
    NarrowWith, NumberSchema, ResultSchema, Schema, StringSchema, StructSchema,
};
pub use value::{Map, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
