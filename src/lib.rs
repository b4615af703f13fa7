//! Fieldrule: composable validation rules for container fields
//!
//! Fieldrule attaches chains of reusable rules to the fields of a container
//! type. Rules are combined into composite rules; the combination is
//! linearized once, at definition time, into a duplicate-free chain that
//! respects every local order a combination declares. Contradictory
//! combinations are rejected instead of silently reordered.
//!
//! # Core Concepts
//!
//! - **Rule**: a named unit with configure, validate and mutate hooks
//! - **RuleType**: definition of a leaf or composite rule, with its chain
//! - **FieldDescriptor**: binds a chain to one field and runs the phases
//! - **Schema / Instance**: the container type and its validated objects
//!
//! Every assignment runs the field's validate phase and collects every
//! rejection; every read runs the mutate phase over the stored value.
//!
//! # Example
//!
//! ```rust
//! use fieldrule::container::{Instance, Schema};
//! use fieldrule::rules::{Number, Sized, Type};
//! use fieldrule::{combine, params, RuleType};
//! use serde_json::json;
//!
//! let name_rule = combine([RuleType::of::<Sized>(), RuleType::of::<Type>()]).unwrap();
//!
//! let schema = Schema::builder("Person")
//!     .field("name", &name_rule, params! { min_size: 2, max_size: 5, types: "string" })
//!     .unwrap()
//!     .field("age", &RuleType::of::<Number>(), params! { min_value: 0 })
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let person = Instance::from_values(&schema, [("name", json!("ab")), ("age", json!(3))]).unwrap();
//! assert_eq!(person.to_string(), r#"Person(name="ab", age=3)"#);
//!
//! let error = Instance::from_values(&schema, [("name", json!(123)), ("age", json!(3))]).unwrap_err();
//! assert_eq!(error.errors, vec!["Attribute `name` should be an instance of `string`"]);
//! ```

pub mod composition;
pub mod container;
pub mod core;
pub mod descriptor;
pub mod error;
pub mod macros;
pub mod rules;
pub mod serialization;

#[doc(hidden)]
pub use serde_json as __serde_json;

// Re-export commonly used types
pub use composition::{combine, CompositionError, RuleType};
pub use container::{Constructor, Instance, Schema, SchemaBuilder, SchemaOptions};
pub use core::{
    ConfigurationError, Context, Mapping, Mutation, Outcome, Params, Rule, RuleError,
    ValidationError, Value, ValueKind,
};
pub use descriptor::FieldDescriptor;
pub use error::Error;
pub use serialization::{from_mapping, to_mapping, SerializationError};
