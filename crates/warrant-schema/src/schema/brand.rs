//! Nominal tagging of validated values
//!
//! Branding does not change what a schema accepts; it only changes the type
//! of the values it hands back, so a `Branded<Did>` can only come from a read
//! through a `BrandedSchema<Did>`.
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use super::{ArraySchema, Field, Schema};
use crate::error::{DefinitionError, SchemaError};
use crate::value::Value;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

/// A schema whose results carry the marker type `B`
pub struct BrandedSchema<B> {
    schema: Schema,
    brand: PhantomData<fn() -> B>,
}

impl<B> BrandedSchema<B> {
    pub(super) fn new(schema: Schema) -> Self {
        Self {
            schema,
            brand: PhantomData,
        }
    }

    pub fn read(&self, input: &Value) -> Result<Branded<B>, SchemaError> {
        self.schema.read(input).map(Branded::new)
    }

    pub fn from(&self, input: impl Into<Value>) -> Result<Branded<B>, SchemaError> {
        self.schema.from(input).map(Branded::new)
    }

    pub fn is(&self, input: &Value) -> bool {
        self.schema.is(input)
    }

    /// Also accept `undefined`, keeping the brand
    pub fn optional(&self) -> BrandedSchema<B> {
        BrandedSchema::new(self.schema.optional())
    }

    /// Also accept `null`, keeping the brand
    pub fn nullable(&self) -> BrandedSchema<B> {
        BrandedSchema::new(self.schema.nullable())
    }

    /// Substitute `value` for a missing input, keeping the brand
    pub fn default(&self, value: impl Into<Value>) -> Result<BrandedSchema<B>, DefinitionError> {
        self.schema.default(value).map(BrandedSchema::new)
    }

    /// Read with this schema, then with `next`, keeping the brand
    pub fn refine(&self, next: impl Into<Schema>) -> BrandedSchema<B> {
        BrandedSchema::new(self.schema.refine(next))
    }

    /// Tag results with `C` instead
    pub fn brand<C>(&self) -> BrandedSchema<C> {
        BrandedSchema::new(self.schema.clone())
    }

    pub fn array(&self) -> ArraySchema {
        self.schema.array()
    }

    pub fn or(&self, other: impl Into<Schema>) -> Schema {
        self.schema.or(other)
    }

    pub fn and(&self, other: impl Into<Schema>) -> Schema {
        self.schema.and(other)
    }

    /// The unbranded schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }
}

impl<B> Clone for BrandedSchema<B> {
    fn clone(&self) -> Self {
        Self::new(self.schema.clone())
    }
}

impl<B> Deref for BrandedSchema<B> {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.schema
    }
}

impl<B> From<BrandedSchema<B>> for Schema {
    fn from(branded: BrandedSchema<B>) -> Self {
        branded.schema
    }
}

impl<B> From<&BrandedSchema<B>> for Schema {
    fn from(branded: &BrandedSchema<B>) -> Self {
        branded.schema.clone()
    }
}

impl<B> From<BrandedSchema<B>> for Field {
    fn from(branded: BrandedSchema<B>) -> Self {
        Field::Schema(branded.schema)
    }
}

impl<B> fmt::Display for BrandedSchema<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.schema, f)
    }
}

impl<B> fmt::Debug for BrandedSchema<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.schema, f)
    }
}

/// A value that passed a [`BrandedSchema<B>`]
pub struct Branded<B> {
    value: Value,
    brand: PhantomData<fn() -> B>,
}

impl<B> Branded<B> {
    fn new(value: Value) -> Self {
        Self {
            value,
            brand: PhantomData,
        }
    }

    pub fn into_inner(self) -> Value {
        self.value
    }
}

impl<B> Deref for Branded<B> {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl<B> Clone for Branded<B> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<B> PartialEq for Branded<B> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<B> fmt::Debug for Branded<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

impl<B> fmt::Display for Branded<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
