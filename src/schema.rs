//! Schema normalization.
//!
//! Runs once per type definition:
//! - zero descriptors → one unconstrained field named `value`;
//! - one unnamed descriptor → named `value`;
//! - several descriptors → each must be named, names must be unique.
//!
//! The result is read-only and shared by every construction.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::DefinitionError;
use crate::field::{FieldDescriptor, FieldSpec, DEFAULT_FIELD_NAME};

#[derive(Debug)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    positions: IndexMap<String, usize>,
}

impl Schema {
    pub fn normalize<I>(descriptors: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        let mut descriptors: Vec<FieldDescriptor> = descriptors.into_iter().collect();
        if descriptors.is_empty() {
            descriptors.push(FieldDescriptor::default());
        }
        let lone = descriptors.len() == 1;

        let mut fields = Vec::with_capacity(descriptors.len());
        let mut positions = IndexMap::with_capacity(descriptors.len());

        for (position, mut d) in descriptors.into_iter().enumerate() {
            let name = match d.name.take() {
                Some(name) => name,
                None if lone => DEFAULT_FIELD_NAME.to_string(),
                None => return Err(DefinitionError::UnnamedField { position }),
            };
            if let Some(&first) = positions.get(&name) {
                return Err(DefinitionError::DuplicateName { name, first, second: position });
            }
            positions.insert(name.clone(), position);
            fields.push(FieldSpec::from_descriptor(name, position, d)?);
        }

        debug!(
            target: "tinytype",
            fields = fields.len(),
            names = ?positions.keys().collect::<Vec<_>>(),
            "schema normalized"
        );
        Ok(Self { fields, positions })
    }

    /// What `normalize` yields for zero descriptors, without the fallible path.
    pub(crate) fn unconstrained() -> Self {
        let spec = FieldSpec::unconstrained(DEFAULT_FIELD_NAME);
        let mut positions = IndexMap::with_capacity(1);
        positions.insert(DEFAULT_FIELD_NAME.to_string(), 0);
        Self { fields: vec![spec], positions }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Never true: normalization always yields at least one field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.position_of(name).map(|i| &self.fields[i])
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }
}
