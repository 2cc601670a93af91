//! Combinators available on every schema
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use super::{array, ArraySchema, BrandedSchema, Kind, Schema};
use crate::error::{DefinitionError, SchemaError};
use crate::value::Value;

impl Schema {
    /// Also accept `undefined`. Schemas that already accept a missing value
    /// are returned as is.
    pub fn optional(&self) -> Schema {
        match self.kind() {
            Kind::Optional(_) | Kind::Default { .. } => self.clone(),
            _ => Schema::from_kind(Kind::Optional(self.clone())),
        }
    }

    /// Also accept `null`
    pub fn nullable(&self) -> Schema {
        match self.kind() {
            Kind::Nullable(_) => self.clone(),
            _ => Schema::from_kind(Kind::Nullable(self.clone())),
        }
    }

    /// Substitute `value` for a missing input.
    ///
    /// The default is read through the schema when the schema is built, and
    /// the normalized result is what gets substituted. Calling `default` on a
    /// defaulted schema replaces the previous default.
    pub fn default(&self, value: impl Into<Value>) -> Result<Schema, DefinitionError> {
        let schema = match self.kind() {
            Kind::Default { schema, .. } => schema.clone(),
            _ => self.clone(),
        };

        let value = schema.read(&value.into()).map_err(|err| {
            tracing::debug!(schema = %schema, error = %err, "default value rejected");
            DefinitionError::InvalidDefault(err)
        })?;
        if value.is_undefined() {
            return Err(DefinitionError::UndefinedDefault);
        }

        Ok(Schema::from_kind(Kind::Default { schema, value }))
    }

    /// The value substituted for missing input, when this schema has one
    pub fn default_value(&self) -> Option<&Value> {
        match self.kind() {
            Kind::Default { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Read with this schema, then read the result with `next`
    pub fn refine(&self, next: impl Into<Schema>) -> Schema {
        Schema::from_kind(Kind::Refine {
            base: self.clone(),
            refinement: next.into(),
        })
    }

    /// Accept what either this schema or `other` accepts, trying this one first
    pub fn or(&self, other: impl Into<Schema>) -> Schema {
        let mut members = match self.kind() {
            Kind::Union(members) => members.clone(),
            _ => vec![self.clone()],
        };
        members.push(other.into());
        Schema::from_kind(Kind::Union(members))
    }

    /// Accept only what both this schema and `other` accept
    pub fn and(&self, other: impl Into<Schema>) -> Schema {
        let mut members = match self.kind() {
            Kind::Intersection(members) => members.clone(),
            _ => vec![self.clone()],
        };
        members.push(other.into());
        Schema::from_kind(Kind::Intersection(members))
    }

    /// Array of values this schema accepts
    pub fn array(&self) -> ArraySchema {
        array(self.clone())
    }

    /// Same validation, with results tagged by the marker type `B`
    pub fn brand<B>(&self) -> BrandedSchema<B> {
        BrandedSchema::new(self.clone())
    }
}

pub(super) fn read_optional(schema: &Schema, input: &Value) -> Result<Value, SchemaError> {
    match schema.read(input) {
        Err(_) if input.is_undefined() => Ok(Value::Undefined),
        result => result,
    }
}

pub(super) fn read_nullable(schema: &Schema, input: &Value) -> Result<Value, SchemaError> {
    match schema.read(input) {
        Err(_) if input.is_null() => Ok(Value::Null),
        result => result,
    }
}

pub(super) fn read_default(
    schema: &Schema,
    value: &Value,
    input: &Value,
) -> Result<Value, SchemaError> {
    if input.is_undefined() {
        return Ok(value.clone());
    }
    let output = schema.read(input)?;
    if output.is_undefined() {
        Ok(value.clone())
    } else {
        Ok(output)
    }
}

pub(super) fn read_refine(
    base: &Schema,
    refinement: &Schema,
    input: &Value,
) -> Result<Value, SchemaError> {
    let narrowed = base.read(input)?;
    refinement.read(&narrowed)
}

pub(super) fn read_union(members: &[Schema], input: &Value) -> Result<Value, SchemaError> {
    let mut causes = Vec::with_capacity(members.len());
    for member in members {
        match member.read(input) {
            Ok(value) => return Ok(value),
            Err(err) => causes.push(err),
        }
    }
    Err(SchemaError::union(causes))
}

pub(super) fn read_intersection(members: &[Schema], input: &Value) -> Result<Value, SchemaError> {
    let causes: Vec<SchemaError> = members
        .iter()
        .filter_map(|member| member.read(input).err())
        .collect();
    if causes.is_empty() {
        Ok(input.clone())
    } else {
        Err(SchemaError::intersection(causes))
    }
}
