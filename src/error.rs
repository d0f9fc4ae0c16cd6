//! Error taxonomy.
//!
//! Two phases fail independently:
//! - [`DefinitionError`] while normalizing descriptors into a schema;
//! - [`ConstructionError`] while building an instance from call arguments.
//!
//! Construction stops at the first failing check of the first failing field,
//! so a single error is ever reported per call.

use std::fmt;

use serde_json::Number;
use thiserror::Error;

use crate::kind::Kind;

/// Umbrella error for callers that define and construct in one place.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Raised once, when a schema is defined.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// Several descriptors were given and one of them has no name.
    #[error("field at position {position} needs an explicit name when several fields are declared")]
    UnnamedField { position: usize },

    #[error("field name `{name}` is declared at both position {first} and position {second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("field `{field}` has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Minimum above maximum for a length or value range.
    #[error("field `{field}` declares a {constraint} minimum above its maximum")]
    InvertedBounds {
        field: String,
        constraint: &'static str,
    },

    /// NaN or infinite `minValue`/`maxValue`.
    #[error("field `{field}` declares a non-finite value bound")]
    NonFiniteBound { field: String },

    /// A JSON descriptor failed to deserialize.
    #[error("invalid field descriptor at {path}: {message}")]
    Descriptor { path: String, message: String },
}

/// How many arguments a constructor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtMost(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

/// Raised by a constructor call. Partial instances are never produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("expected {expected} argument(s), got {supplied}")]
    Arity { expected: Arity, supplied: usize },

    #[error("field `{field}` requires a value")]
    MissingValue { field: String },

    #[error("field `{field}` expects {expected} but got {actual}")]
    TypeMismatch {
        field: String,
        expected: Kind,
        actual: Kind,
    },

    #[error("field `{field}` does not match pattern `{pattern}`")]
    Pattern { field: String, pattern: String },

    #[error("field `{field}` has length {length}, allowed {}", bounds(.min, .max))]
    Length {
        field: String,
        length: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    #[error("field `{field}` has value {value}, allowed {}", bounds(.min, .max))]
    Range {
        field: String,
        value: Number,
        min: Option<f64>,
        max: Option<f64>,
    },

    #[error("field `{field}` was rejected by its validator")]
    Validation { field: String },
}

impl ConstructionError {
    /// The field that failed, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConstructionError::Arity { .. } => None,
            ConstructionError::MissingValue { field }
            | ConstructionError::TypeMismatch { field, .. }
            | ConstructionError::Pattern { field, .. }
            | ConstructionError::Length { field, .. }
            | ConstructionError::Range { field, .. }
            | ConstructionError::Validation { field } => Some(field),
        }
    }
}

fn bounds<T: fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{lo}..={hi}"),
        (Some(lo), None) => format!(">= {lo}"),
        (None, Some(hi)) => format!("<= {hi}"),
        (None, None) => "any".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_field_and_rule() {
        let err = ConstructionError::Length {
            field: "code".into(),
            length: 4,
            min: None,
            max: Some(3),
        };
        assert_eq!(err.to_string(), "field `code` has length 4, allowed <= 3");
        assert_eq!(err.field(), Some("code"));

        let err = ConstructionError::Range {
            field: "age".into(),
            value: Number::from(-1),
            min: Some(0.0),
            max: Some(3.0),
        };
        assert_eq!(err.to_string(), "field `age` has value -1, allowed 0..=3");
    }

    #[test]
    fn arity_has_no_field() {
        let err = ConstructionError::Arity { expected: Arity::Exactly(1), supplied: 2 };
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "expected exactly 1 argument(s), got 2");
    }
}
