//! Composite schemas: arrays, tuples, dictionaries, structs and results
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use super::{literal, string, Kind, Schema};
use crate::error::{DefinitionError, SchemaError};
use crate::value::{Map, Value};
use std::sync::Arc;

/// Build a struct field list: `fields! { "name" => string(), "v" => 1 }`.
///
/// Each value is anything convertible into a [`Field`](crate::Field): a
/// schema, or a scalar that becomes a literal schema.
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<(&str, $crate::Field)>::new()
    };
    ($($name:expr => $field:expr),+ $(,)?) => {
        ::std::vec![$(($name, $crate::Field::from($field))),+]
    };
}

/// Array whose every element reads with `element`
pub fn array(element: impl Into<Schema>) -> ArraySchema {
    let element = element.into();
    ArraySchema {
        schema: Schema::from_kind(Kind::Array(element.clone())),
        element,
    }
}

/// Fixed-length array with a schema per position
pub fn tuple(elements: impl IntoIterator<Item = Schema>) -> Schema {
    Schema::from_kind(Kind::Tuple(elements.into_iter().collect()))
}

/// Object with arbitrary string keys and values read with `value`
pub fn dictionary(value: impl Into<Schema>) -> DictionarySchema {
    DictionarySchema::new(string().into(), value.into())
}

/// Object with a fixed set of named fields.
///
/// Fields are read in declaration order. A name given twice keeps its first
/// position and its last descriptor.
pub fn structure<I, K, F>(fields: I) -> Result<StructSchema, DefinitionError>
where
    I: IntoIterator<Item = (K, F)>,
    K: Into<String>,
    F: Into<Field>,
{
    StructSchema::build(Vec::new(), fields)
}

/// Object carrying either an `ok` value read with `ok` or an `error` value
/// read with `error`. When both are present `ok` wins; the output carries
/// only the chosen field.
pub fn result(ok: impl Into<Schema>, error: impl Into<Schema>) -> ResultSchema {
    let ok = ok.into();
    let error = error.into();
    ResultSchema {
        schema: Schema::from_kind(Kind::Result {
            ok: ok.clone(),
            error: error.clone(),
        }),
        ok,
        error,
    }
}

#[derive(Clone)]
pub struct ArraySchema {
    schema: Schema,
    element: Schema,
}

schema_view!(ArraySchema);

impl ArraySchema {
    pub fn element(&self) -> &Schema {
        &self.element
    }
}

#[derive(Clone)]
pub struct DictionarySchema {
    schema: Schema,
    key: Schema,
    value: Schema,
}

schema_view!(DictionarySchema);

impl DictionarySchema {
    fn new(key: Schema, value: Schema) -> Self {
        Self {
            schema: Schema::from_kind(Kind::Dictionary {
                key: key.clone(),
                value: value.clone(),
            }),
            key,
            value,
        }
    }

    /// Schema keys are read with
    pub fn key(&self) -> &Schema {
        &self.key
    }

    /// Schema values are read with
    pub fn value(&self) -> &Schema {
        &self.value
    }

    /// Same dictionary with keys restricted by `key`
    pub fn with_key(&self, key: impl Into<Schema>) -> DictionarySchema {
        DictionarySchema::new(key.into(), self.value.clone())
    }
}

#[derive(Clone)]
pub struct ResultSchema {
    schema: Schema,
    ok: Schema,
    error: Schema,
}

schema_view!(ResultSchema);

impl ResultSchema {
    /// Schema the `ok` branch is read with
    pub fn ok(&self) -> &Schema {
        &self.ok
    }

    /// Schema the `error` branch is read with
    pub fn error(&self) -> &Schema {
        &self.error
    }
}

/// A struct field descriptor
#[derive(Clone, Debug)]
pub enum Field {
    Schema(Schema),
    /// Scalar shorthand for a literal schema. Only strings, numbers, booleans
    /// and `null` are accepted when the struct is built.
    Literal(Value),
}

impl Field {
    pub fn null() -> Field {
        Field::Literal(Value::Null)
    }

    fn into_schema(self, name: &str) -> Result<Schema, DefinitionError> {
        match self {
            Field::Schema(schema) => Ok(schema),
            Field::Literal(
                value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)),
            ) => Ok(literal(value).into()),
            Field::Literal(other) => {
                tracing::debug!(field = name, kind = other.kind_name(), "invalid struct field");
                Err(DefinitionError::InvalidField {
                    name: name.to_string(),
                    kind: other.kind_name().to_string(),
                })
            }
        }
    }
}

impl From<Schema> for Field {
    fn from(schema: Schema) -> Self {
        Field::Schema(schema)
    }
}

impl From<&Schema> for Field {
    fn from(schema: &Schema) -> Self {
        Field::Schema(schema.clone())
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::Literal(value)
    }
}

macro_rules! literal_field {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Field {
                fn from(value: $t) -> Self {
                    Field::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_field!(&str, String, bool, f64, i32, i64, u32, u64);

#[derive(Clone)]
pub struct StructSchema {
    schema: Schema,
    fields: Arc<Vec<(String, Schema)>>,
}

schema_view!(StructSchema);

impl StructSchema {
    fn build<I, K, F>(mut shape: Vec<(String, Schema)>, fields: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: Into<Field>,
    {
        for (name, field) in fields {
            let name = name.into();
            let schema = field.into().into_schema(&name)?;
            match shape.iter_mut().find(|(existing, _)| *existing == name) {
                Some(entry) => entry.1 = schema,
                None => shape.push((name, schema)),
            }
        }

        let fields = Arc::new(shape);
        Ok(Self {
            schema: Schema::from_kind(Kind::Struct(Arc::clone(&fields))),
            fields,
        })
    }

    /// Field names and schemas in declaration order
    pub fn fields(&self) -> &[(String, Schema)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Schema> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, schema)| schema)
    }

    /// New struct with `fields` added. Names already present are replaced in
    /// place; this schema is left unchanged.
    pub fn extend<I, K, F>(&self, fields: I) -> Result<StructSchema, DefinitionError>
    where
        I: IntoIterator<Item = (K, F)>,
        K: Into<String>,
        F: Into<Field>,
    {
        Self::build(self.fields.as_ref().clone(), fields)
    }

    /// Read `input`, treating a missing input as an empty object so that
    /// defaults fill in every field
    pub fn create(&self, input: Option<&Value>) -> Result<Value, SchemaError> {
        match input {
            None | Some(Value::Undefined) => self.schema.read(&Value::object()),
            Some(input) => self.schema.read(input),
        }
    }
}

pub(super) fn read_array(element: &Schema, input: &Value) -> Result<Value, SchemaError> {
    let Value::Array(items) = input else {
        return Err(SchemaError::type_mismatch("array", input));
    };
    items
        .iter()
        .map(|item| element.read(item))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

pub(super) fn read_tuple(elements: &[Schema], input: &Value) -> Result<Value, SchemaError> {
    let Value::Array(items) = input else {
        return Err(SchemaError::type_mismatch("array", input));
    };
    if items.len() != elements.len() {
        return Err(SchemaError::length(elements.len(), items.len()));
    }

    elements
        .iter()
        .zip(items)
        .enumerate()
        .map(|(at, (schema, item))| {
            schema
                .read(item)
                .map_err(|cause| SchemaError::invalid_element(at, cause))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

pub(super) fn read_dictionary(
    key: &Schema,
    value: &Schema,
    input: &Value,
) -> Result<Value, SchemaError> {
    let Value::Object(entries) = input else {
        return Err(SchemaError::type_mismatch("dictionary", input));
    };

    let mut output = Map::new();
    for (name, entry) in entries {
        let name_out = key
            .read(&Value::String(name.clone()))
            .map_err(|cause| SchemaError::invalid_field(name.as_str(), cause))?;
        let entry_out = value
            .read(entry)
            .map_err(|cause| SchemaError::invalid_field(name.as_str(), cause))?;
        if entry_out.is_undefined() {
            continue;
        }
        let name_out = match name_out {
            Value::String(s) => s,
            other => other.to_string(),
        };
        output.insert(name_out, entry_out);
    }
    Ok(Value::Object(output))
}

pub(super) fn read_struct(
    fields: &[(String, Schema)],
    input: &Value,
) -> Result<Value, SchemaError> {
    if !matches!(input, Value::Object(_)) {
        return Err(SchemaError::type_mismatch("object", input));
    }

    let mut output = Map::new();
    for (name, schema) in fields {
        let field = schema
            .read(input.get(name))
            .map_err(|cause| SchemaError::invalid_field(name.as_str(), cause))?;
        if !field.is_undefined() {
            output.insert(name.clone(), field);
        }
    }
    Ok(Value::Object(output))
}

pub(super) fn read_result(
    ok: &Schema,
    error: &Schema,
    input: &Value,
) -> Result<Value, SchemaError> {
    if !matches!(input, Value::Object(_)) {
        return Err(SchemaError::type_mismatch("object", input));
    }

    let (name, schema) = if !input.get("ok").is_undefined() {
        ("ok", ok)
    } else if !input.get("error").is_undefined() {
        ("error", error)
    } else {
        return Err(SchemaError::constraint(format!(
            "Expected an object with either an \"ok\" or an \"error\" field instead got {}",
            input
        )));
    };

    let branch = schema
        .read(input.get(name))
        .map_err(|cause| SchemaError::invalid_field(name, cause))?;
    Ok(Value::from_iter([(name, branch)]))
}
