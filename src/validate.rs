//! Per-field resolution and validation.
//!
//! Each slot goes through a fixed pipeline and stops at the first failure:
//! 1. absent → default (producer or literal), else "no value" if optional,
//!    else `MissingValue`;
//! 2. declared kind;
//! 3. kind-specific rules (string pattern then length, number range);
//! 4. custom validator.
//!
//! Fields never see each other's values.
pub mod num;
pub mod str;

use serde_json::Value;
use tracing::trace;

use crate::error::ConstructionError;
use crate::field::FieldSpec;
use crate::kind::Kind;

pub use num::NumRules;
pub use str::{Pattern, StrRules};

// ------------------------------- Resolve --------------------------------- //

/// Resolve one slot against its spec. `Ok(None)` means an optional field
/// that received nothing.
pub fn resolve_field(
    spec: &FieldSpec,
    slot: Option<Value>,
) -> Result<Option<Value>, ConstructionError> {
    let value = match slot {
        Some(v) => v,
        None => match spec.default_value() {
            Some(default) => {
                trace!(target: "tinytype", field = spec.name(), "using default");
                default.produce()
            }
            None if spec.is_optional() => {
                trace!(target: "tinytype", field = spec.name(), "optional field left empty");
                return Ok(None);
            }
            None => {
                return Err(ConstructionError::MissingValue { field: spec.name().to_string() });
            }
        },
    };
    check_value(spec, &value)?;
    Ok(Some(value))
}

// -------------------------------- Check ---------------------------------- //

/// Run kind, kind-specific and custom checks on a present value.
pub fn check_value(spec: &FieldSpec, value: &Value) -> Result<(), ConstructionError> {
    if let Some(expected) = spec.kind() {
        let actual = Kind::of(value);
        if actual != expected {
            return Err(ConstructionError::TypeMismatch {
                field: spec.name().to_string(),
                expected,
                actual,
            });
        }
        match value {
            Value::String(s) => spec.str_rules().check(spec.name(), s)?,
            Value::Number(n) => spec.num_rules().check(spec.name(), n)?,
            _ => {}
        }
    }

    if let Some(validator) = spec.validator() {
        if !validator.accepts(value) {
            return Err(ConstructionError::Validation { field: spec.name().to_string() });
        }
    }
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //
