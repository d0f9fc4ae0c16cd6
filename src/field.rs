//! Field descriptors and their normalized form.
//!
//! A [`FieldDescriptor`] is what the developer writes: an unordered bag of
//! optional attributes, built in code or loaded from JSON. Normalization
//! turns each one into a [`FieldSpec`] with a fixed name and position,
//! compiled pattern and checked bounds. Specs are never mutated afterwards.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::DefinitionError;
use crate::kind::Kind;
use crate::validate::{NumRules, Pattern, StrRules};

/// Name given to the field of a single-field type that declares none.
pub const DEFAULT_FIELD_NAME: &str = "value";

// ————————————————————————————————————————————————————————————————————————————
// DEFAULTS & VALIDATORS
// ————————————————————————————————————————————————————————————————————————————

/// Where a field's value comes from when the caller supplies none.
#[derive(Clone)]
pub enum DefaultValue {
    Literal(Value),
    /// Invoked afresh for every absent value; never cached.
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Literal(v) => v.clone(),
            DefaultValue::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Custom predicate run on a present value after the built-in checks.
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Validator {
    pub fn new(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn accepts(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DESCRIPTOR
// ————————————————————————————————————————————————————————————————————————————

/// Raw, developer-supplied description of one field.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDescriptor {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<Kind>,

    #[serde(rename = "regex")]
    pub pattern: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,

    pub min_value: Option<f64>,
    pub max_value: Option<f64>,

    #[serde(default, deserialize_with = "literal_default")]
    pub default_value: Option<DefaultValue>,

    #[serde(default)]
    pub optional: bool,

    /// Code-only; JSON descriptors cannot carry a predicate.
    #[serde(skip)]
    pub validator: Option<Validator>,
}

fn literal_default<'de, D>(de: D) -> Result<Option<DefaultValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(|v| Some(DefaultValue::Literal(v)))
}

impl FieldDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Regular expression the whole string must match.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn min_value(mut self, n: f64) -> Self {
        self.min_value = Some(n);
        self
    }

    pub fn max_value(mut self, n: f64) -> Self {
        self.max_value = Some(n);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(DefaultValue::Literal(value.into()));
        self
    }

    pub fn default_with(mut self, producer: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default_value = Some(DefaultValue::Producer(Arc::new(producer)));
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn validator(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Validator::new(f));
        self
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NORMALIZED SPEC
// ————————————————————————————————————————————————————————————————————————————

/// One field of a schema after normalization.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: String,
    position: usize,
    kind: Option<Kind>,
    default_value: Option<DefaultValue>,
    optional: bool,
    str_rules: StrRules,
    num_rules: NumRules,
    validator: Option<Validator>,
}

impl FieldSpec {
    pub(crate) fn from_descriptor(
        name: String,
        position: usize,
        d: FieldDescriptor,
    ) -> Result<Self, DefinitionError> {
        let pattern = match d.pattern.as_deref() {
            Some(src) => Some(Pattern::new(src).map_err(|source| DefinitionError::InvalidPattern {
                field: name.clone(),
                source,
            })?),
            None => None,
        };

        if let (Some(lo), Some(hi)) = (d.min_length, d.max_length) {
            if lo > hi {
                return Err(DefinitionError::InvertedBounds { field: name, constraint: "length" });
            }
        }
        if [d.min_value, d.max_value].into_iter().flatten().any(|b| !b.is_finite()) {
            return Err(DefinitionError::NonFiniteBound { field: name });
        }
        if let (Some(lo), Some(hi)) = (d.min_value, d.max_value) {
            if lo > hi {
                return Err(DefinitionError::InvertedBounds { field: name, constraint: "value" });
            }
        }

        let str_rules = StrRules { pattern, min_length: d.min_length, max_length: d.max_length };
        let num_rules = NumRules { min_value: d.min_value, max_value: d.max_value };

        // Per-kind rules only run once the declared kind matches.
        if !str_rules.is_empty() && d.kind != Some(Kind::String) {
            warn!(target: "tinytype", field = %name, "string rules ignored: field is not declared as string");
        }
        if !num_rules.is_empty() && d.kind != Some(Kind::Number) {
            warn!(target: "tinytype", field = %name, "number rules ignored: field is not declared as number");
        }

        Ok(Self {
            name,
            position,
            kind: d.kind,
            default_value: d.default_value,
            optional: d.optional,
            str_rules,
            num_rules,
            validator: d.validator,
        })
    }

    pub(crate) fn unconstrained(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: 0,
            kind: None,
            default_value: None,
            optional: false,
            str_rules: StrRules::default(),
            num_rules: NumRules::default(),
            validator: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn str_rules(&self) -> &StrRules {
        &self.str_rules
    }

    pub fn num_rules(&self) -> &NumRules {
        &self.num_rules
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn producer_runs_on_every_call() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();
        let d = DefaultValue::Producer(Arc::new(move || {
            json!(counter.fetch_add(1, Ordering::SeqCst))
        }));
        assert_eq!(d.produce(), json!(0));
        assert_eq!(d.produce(), json!(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn builder_sets_every_attribute() {
        let d = FieldDescriptor::named("age")
            .kind(Kind::Number)
            .min_value(0.0)
            .max_value(150.0)
            .default_value(18)
            .optional()
            .validator(|v| v.as_i64().is_some());
        assert_eq!(d.name.as_deref(), Some("age"));
        assert_eq!(d.kind, Some(Kind::Number));
        assert_eq!(d.min_value, Some(0.0));
        assert_eq!(d.max_value, Some(150.0));
        assert!(d.optional);
        assert!(matches!(d.default_value, Some(DefaultValue::Literal(ref v)) if *v == json!(18)));
        assert!(d.validator.unwrap().accepts(&json!(3)));
    }

    #[test]
    fn compiles_pattern_once() {
        let d = FieldDescriptor::named("user").kind(Kind::String).pattern("[a-z]+");
        let spec = FieldSpec::from_descriptor("user".into(), 0, d).unwrap();
        let pattern = spec.str_rules().pattern.as_ref().unwrap();
        assert!(pattern.is_full_match("abc"));
        assert_eq!(spec.position(), 0);
    }

    #[test]
    fn rejects_bad_pattern_and_inverted_bounds() {
        let d = FieldDescriptor::new().kind(Kind::String).pattern("[");
        assert!(matches!(
            FieldSpec::from_descriptor("value".into(), 0, d),
            Err(DefinitionError::InvalidPattern { .. })
        ));

        let d = FieldDescriptor::new().kind(Kind::String).min_length(4).max_length(3);
        assert!(matches!(
            FieldSpec::from_descriptor("value".into(), 0, d),
            Err(DefinitionError::InvertedBounds { constraint: "length", .. })
        ));

        let d = FieldDescriptor::new().kind(Kind::Number).min_value(1.0).max_value(0.5);
        assert!(matches!(
            FieldSpec::from_descriptor("value".into(), 0, d),
            Err(DefinitionError::InvertedBounds { constraint: "value", .. })
        ));
    }

    #[test]
    fn rejects_non_finite_value_bounds() {
        for d in [
            FieldDescriptor::new().kind(Kind::Number).min_value(f64::NAN),
            FieldDescriptor::new().kind(Kind::Number).max_value(f64::NAN),
            FieldDescriptor::new().kind(Kind::Number).min_value(0.0).max_value(f64::INFINITY),
            FieldDescriptor::new().kind(Kind::Number).min_value(f64::NEG_INFINITY),
        ] {
            assert!(matches!(
                FieldSpec::from_descriptor("value".into(), 0, d),
                Err(DefinitionError::NonFiniteBound { .. })
            ));
        }
    }
}
