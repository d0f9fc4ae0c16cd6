//! Argument resolution: call arguments → one slot per field.
//!
//! Two conventions, picked once per call by [`select`]:
//! - `Keyed` when the schema has more than one field, exactly one argument
//!   was given, and that argument is a JSON object;
//! - `Positional` otherwise.
//!
//! A single-field schema is the degenerate positional case: it takes at most
//! one argument, and zero arguments leave its one slot absent so defaults and
//! optionality still apply.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{Arity, ConstructionError};
use crate::schema::Schema;

/// One argument or field input. `None` is the absent marker.
pub type Slot = Option<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    Positional,
    Keyed,
}

pub fn select(schema: &Schema, args: &[Slot]) -> Convention {
    match args {
        [Some(Value::Object(_))] if schema.len() > 1 => Convention::Keyed,
        _ => Convention::Positional,
    }
}

/// Resolve arguments with the convention [`select`] picks.
pub fn resolve(schema: &Schema, args: Vec<Slot>) -> Result<Vec<Slot>, ConstructionError> {
    let convention = select(schema, &args);
    trace!(target: "tinytype", ?convention, supplied = args.len(), "resolving arguments");
    if convention == Convention::Keyed {
        if let [Some(Value::Object(bag))] = args.as_slice() {
            return Ok(keyed(schema, bag));
        }
    }
    positional(schema, args)
}

/// Map argument `i` to field `i`; missing tail positions are absent.
pub fn positional(schema: &Schema, mut args: Vec<Slot>) -> Result<Vec<Slot>, ConstructionError> {
    check_upper_arity(schema, args.len())?;
    args.resize(schema.len(), None);
    Ok(args)
}

/// Look every field up by name; missing keys are absent, extra keys ignored.
pub fn keyed(schema: &Schema, bag: &Map<String, Value>) -> Vec<Slot> {
    schema.names().map(|name| bag.get(name).cloned()).collect()
}

fn check_upper_arity(schema: &Schema, supplied: usize) -> Result<(), ConstructionError> {
    let n = schema.len();
    if supplied > n {
        let expected = if n == 1 { Arity::Exactly(1) } else { Arity::AtMost(n) };
        return Err(ConstructionError::Arity { expected, supplied });
    }
    Ok(())
}
