//! The generated constructor.
//!
//! `TinyType::define` normalizes descriptors once; each `construct*` call then
//! runs resolve → validate → build against the shared, read-only schema.
//! Every `define` yields a distinct type; clones share identity.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::descriptor_de;
use crate::error::{ConstructionError, DefinitionError};
use crate::field::FieldDescriptor;
use crate::instance::Instance;
use crate::resolve::{self, Slot};
use crate::schema::Schema;
use crate::validate;

#[derive(Clone, Debug)]
pub struct TinyType {
    schema: Arc<Schema>,
}

impl TinyType {
    pub fn define<I>(descriptors: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        let schema = Schema::normalize(descriptors)?;
        Ok(Self { schema: Arc::new(schema) })
    }

    /// A type with one unconstrained field named `value`.
    pub fn single() -> Self {
        Self { schema: Arc::new(Schema::unconstrained()) }
    }

    /// Define a type from a JSON array of descriptors.
    pub fn from_json_str(src: &str) -> Result<Self, DefinitionError> {
        Self::define(descriptor_de::descriptors_from_str(src)?)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Construct from call arguments. A sole JSON object is treated as a
    /// keyed bag when the type has several fields; anything else is
    /// positional. `None` arguments are absent.
    pub fn construct<I>(&self, args: I) -> Result<Instance, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Slot>,
    {
        let args: Vec<Slot> = args.into_iter().map(Into::into).collect();
        let slots = resolve::resolve(&self.schema, args)?;
        self.finish(slots)
    }

    /// Construct with no arguments at all.
    pub fn construct_empty(&self) -> Result<Instance, ConstructionError> {
        self.construct(std::iter::empty::<Slot>())
    }

    /// Positional only: a sole object argument is a value, never a bag.
    pub fn construct_positional<I>(&self, args: I) -> Result<Instance, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Slot>,
    {
        let args: Vec<Slot> = args.into_iter().map(Into::into).collect();
        let slots = resolve::positional(&self.schema, args)?;
        self.finish(slots)
    }

    /// Keyed only, for any number of fields.
    pub fn construct_keyed(&self, bag: &Map<String, Value>) -> Result<Instance, ConstructionError> {
        let slots = resolve::keyed(&self.schema, bag);
        self.finish(slots)
    }

    pub fn is_instance(&self, instance: &Instance) -> bool {
        Arc::ptr_eq(&self.schema, instance.schema())
    }

    fn finish(&self, slots: Vec<Slot>) -> Result<Instance, ConstructionError> {
        let mut values = Vec::with_capacity(slots.len());
        for (spec, slot) in self.schema.fields().iter().zip(slots) {
            match validate::resolve_field(spec, slot) {
                Ok(value) => values.push(value),
                Err(error) => {
                    debug!(target: "tinytype", field = spec.name(), %error, "construction rejected");
                    return Err(error);
                }
            }
        }
        Ok(Instance::build(self.schema.clone(), values))
    }
}

/// Same identity, not structural equality.
impl PartialEq for TinyType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema)
    }
}

impl Eq for TinyType {}
