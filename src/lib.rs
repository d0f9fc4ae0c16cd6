//! Tiny types: immutable, validated value objects defined by a field schema.
//!
//! ```
//! use serde_json::json;
//! use tinytype::{FieldDescriptor, Kind, TinyType};
//!
//! let email = TinyType::define([
//!     FieldDescriptor::named("username").kind(Kind::String).pattern("[^@]+"),
//!     FieldDescriptor::named("domain").kind(Kind::String).default_value("example.com"),
//! ])?;
//!
//! let e = email.construct([json!("alice")])?;
//! assert_eq!(e.get("domain"), Some(&json!("example.com")));
//!
//! let e = email.construct([json!({"username": "alice"})])?;
//! assert_eq!(e.get("username"), Some(&json!("alice")));
//!
//! assert!(email.construct([json!("alice@x"), json!("y")]).is_err());
//! # Ok::<(), tinytype::Error>(())
//! ```
//!
//! Pipeline:
//! - definition: [`schema`] normalizes descriptors once;
//! - construction: [`resolve`] → [`validate`] → [`instance`].
pub mod descriptor_de;
pub mod error;
pub mod field;
pub mod instance;
pub mod kind;
pub mod resolve;
pub mod schema;
pub mod tiny_type;
pub mod validate;

pub use error::{Arity, ConstructionError, DefinitionError, Error};
pub use field::{DefaultValue, FieldDescriptor, FieldSpec, Validator, DEFAULT_FIELD_NAME};
pub use instance::Instance;
pub use kind::Kind;
pub use resolve::{Convention, Slot};
pub use schema::Schema;
pub use tiny_type::TinyType;
