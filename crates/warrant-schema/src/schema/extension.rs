//! User-defined schemas
//!
//! Implement [`Narrow`] (or [`NarrowWith`] for schemas that carry settings)
//! and wrap the reader with [`Schema::custom`] / [`Schema::custom_with`].
//! The result composes with every combinator like a built-in schema.
//!
//! ```
//! use warrant_schema::{Narrow, Schema, SchemaError, Value};
//!
//! struct Even;
//!
//! impl Narrow for Even {
//!     fn narrow(&self, input: &Value) -> Result<Value, SchemaError> {
//!         match input.as_f64() {
//!             Some(n) if n % 2.0 == 0.0 => Ok(input.clone()),
//!             _ => Err(SchemaError::type_mismatch("even number", input)),
//!         }
//!     }
//! }
//!
//! let even = Schema::custom(Even).optional();
//! assert!(even.is(&Value::from(4)));
//! assert!(even.is(&Value::Undefined));
//! assert_eq!(even.to_string(), "Even.optional()");
//! ```
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use super::{Kind, Schema};
use crate::error::SchemaError;
use crate::value::Value;
use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A reader for a custom schema
pub trait Narrow: Send + Sync + 'static {
    fn narrow(&self, input: &Value) -> Result<Value, SchemaError>;

    /// Rendering of the schema, the bare type name by default
    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(type_name::<Self>()))
    }
}

/// A reader for a custom schema parameterized by `Settings`
pub trait NarrowWith: Send + Sync + 'static {
    type Settings: fmt::Debug + Send + Sync + 'static;

    fn narrow_with(&self, input: &Value, settings: &Self::Settings)
        -> Result<Value, SchemaError>;

    /// Rendering of the schema, `Name(settings)` by default
    fn describe(&self, settings: &Self::Settings, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", short_type_name(type_name::<Self>()), settings)
    }
}

fn short_type_name(name: &'static str) -> &'static str {
    let path = name.split('<').next().unwrap_or(name);
    path.rsplit("::").next().unwrap_or(path)
}

trait Reader: Send + Sync {
    fn read(&self, input: &Value) -> Result<Value, SchemaError>;
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

struct Plain<N>(N);

impl<N: Narrow> Reader for Plain<N> {
    fn read(&self, input: &Value) -> Result<Value, SchemaError> {
        self.0.narrow(input)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name())
    }
}

struct WithSettings<N: NarrowWith> {
    narrow: N,
    settings: N::Settings,
}

impl<N: NarrowWith> Reader for WithSettings<N> {
    fn read(&self, input: &Value) -> Result<Value, SchemaError> {
        self.narrow.narrow_with(input, &self.settings)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.narrow.describe(&self.settings, f)
    }
}

struct FnReader<F> {
    name: Cow<'static, str>,
    read: F,
}

impl<F> Reader for FnReader<F>
where
    F: Fn(&Value) -> Result<Value, SchemaError> + Send + Sync,
{
    fn read(&self, input: &Value) -> Result<Value, SchemaError> {
        (self.read)(input)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Type-erased custom reader held by [`Kind::Extension`]
#[derive(Clone)]
pub struct Extension {
    reader: Arc<dyn Reader>,
}

impl Extension {
    pub(super) fn read(&self, input: &Value) -> Result<Value, SchemaError> {
        self.reader.read(input)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reader.render(f)
    }
}

impl Schema {
    fn extension(reader: Arc<dyn Reader>) -> Schema {
        Schema::from_kind(Kind::Extension(Extension { reader }))
    }

    /// Schema backed by a custom reader
    pub fn custom<N: Narrow>(narrow: N) -> Schema {
        Self::extension(Arc::new(Plain(narrow)))
    }

    /// Schema backed by a custom reader and its settings
    pub fn custom_with<N: NarrowWith>(narrow: N, settings: N::Settings) -> Schema {
        Self::extension(Arc::new(WithSettings { narrow, settings }))
    }

    /// Schema backed by a closure, rendered as `name`
    pub fn from_fn<F>(name: impl Into<Cow<'static, str>>, read: F) -> Schema
    where
        F: Fn(&Value) -> Result<Value, SchemaError> + Send + Sync + 'static,
    {
        Self::extension(Arc::new(FnReader {
            name: name.into(),
            read,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{integer, string};

    struct Lowercase;

    impl Narrow for Lowercase {
        fn narrow(&self, input: &Value) -> Result<Value, SchemaError> {
            match input.as_str() {
                Some(s) => Ok(Value::from(s.to_lowercase())),
                None => Err(SchemaError::type_mismatch("string", input)),
            }
        }
    }

    struct MaxLength;

    impl NarrowWith for MaxLength {
        type Settings = usize;

        fn narrow_with(&self, input: &Value, max: &usize) -> Result<Value, SchemaError> {
            match input.as_str() {
                Some(s) if s.chars().count() <= *max => Ok(input.clone()),
                Some(_) => Err(SchemaError::constraint(format!(
                    "Expected at most {} characters",
                    max
                ))),
                None => Err(SchemaError::type_mismatch("string", input)),
            }
        }
    }

    #[test]
    fn test_custom_schema_may_transform() {
        let schema = Schema::custom(Lowercase);
        assert_eq!(schema.read(&Value::from("AbC")).unwrap(), Value::from("abc"));
        assert_eq!(schema.to_string(), "Lowercase");
    }

    #[test]
    fn test_parameterized_schema_renders_settings() {
        let schema = string().refine(Schema::custom_with(MaxLength, 3));
        assert_eq!(schema.to_string(), "string().refine(MaxLength(3))");
        assert!(schema.is(&Value::from("abc")));
        assert_eq!(
            schema.read(&Value::from("abcd")).unwrap_err().message(),
            "Expected at most 3 characters"
        );
    }

    #[test]
    fn test_closure_schema_composes() {
        let positive = Schema::from_fn("positive", |input| match input.as_f64() {
            Some(n) if n > 0.0 => Ok(input.clone()),
            _ => Err(SchemaError::new("Expected a positive number")),
        });
        let schema = integer().refine(positive).array();
        assert_eq!(schema.to_string(), "array(integer().refine(positive))");
        assert!(schema.is(&Value::array([1, 2])));
        assert!(!schema.is(&Value::array([1, -2])));
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::C"), "C");
        assert_eq!(short_type_name("a::C<b::D>"), "C");
        assert_eq!(short_type_name("C"), "C");
    }
}
