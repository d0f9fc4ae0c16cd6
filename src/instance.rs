//! Constructed value objects.
//!
//! An [`Instance`] holds exactly one slot per schema field, in schema order.
//! There is no mutable access: "changing" a value means constructing a new
//! instance.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::field::DEFAULT_FIELD_NAME;
use crate::schema::Schema;

#[derive(Clone)]
pub struct Instance {
    schema: Arc<Schema>,
    values: Vec<Option<Value>>,
}

impl Instance {
    /// `values` must already be resolved and aligned to `schema`.
    pub(crate) fn build(schema: Arc<Schema>, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    /// Value of a field. `None` both for an optional field left empty and
    /// for a name the schema does not declare; see [`Instance::has_field`].
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.position_of(name).and_then(|i| self.values[i].as_ref())
    }

    /// Shorthand for the `value` field of a single, unnamed field type.
    pub fn value(&self) -> Option<&Value> {
        self.get(DEFAULT_FIELD_NAME)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.schema.position_of(name).is_some()
    }

    /// Every field in schema order, including empty optional ones.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.schema.names().zip(self.values.iter().map(Option::as_ref))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

/// Equal only when built by the same type and holding the same values.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use serde_json::json;

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::normalize([FieldDescriptor::named("username"), FieldDescriptor::named("nickname")])
                .unwrap(),
        )
    }

    #[test]
    fn fields_are_exposed_in_schema_order() {
        let i = Instance::build(schema(), vec![Some(json!("alice")), None]);
        let fields: Vec<_> = i.fields().collect();
        assert_eq!(fields, vec![("username", Some(&json!("alice"))), ("nickname", None)]);
        assert_eq!(i.len(), 2);
    }

    #[test]
    fn empty_and_unknown_fields_read_as_none() {
        let i = Instance::build(schema(), vec![Some(json!("alice")), None]);
        assert_eq!(i.get("nickname"), None);
        assert!(i.has_field("nickname"));
        assert_eq!(i.get("value"), None);
        assert!(!i.has_field("value"));
    }

    #[test]
    fn equality_requires_the_same_schema() {
        let s = schema();
        let a = Instance::build(s.clone(), vec![Some(json!("alice")), None]);
        let b = Instance::build(s, vec![Some(json!("alice")), None]);
        let c = Instance::build(schema(), vec![Some(json!("alice")), None]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn debug_prints_as_a_map() {
        let i = Instance::build(schema(), vec![Some(json!("alice")), None]);
        assert_eq!(format!("{i:?}"), r#"{"username": Some(String("alice")), "nickname": None}"#);
    }
}
