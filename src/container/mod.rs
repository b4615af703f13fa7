//! Container types: schemas, instances and generated constructors.
//!
//! A `Schema` is the static descriptor table of a container type, built once
//! with `SchemaBuilder`. An `Instance` holds the stored values of one object
//! of that type; every assignment goes through the owning field descriptor,
//! so stored values always satisfy their rule chains.
//!
//! # Example
//!
//! ```rust
//! use fieldrule::composition::combine;
//! use fieldrule::container::{Instance, Schema};
//! use fieldrule::rules::{Sized, Type};
//! use fieldrule::{params, RuleType};
//! use serde_json::json;
//!
//! let name_rule = combine([RuleType::of::<Sized>(), RuleType::of::<Type>()]).unwrap();
//! let schema = Schema::builder("Person")
//!     .field("name", &name_rule, params! { min_size: 2, max_size: 5, types: "string" })
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut person = schema.constructor().call([json!("ab")]).unwrap();
//! assert_eq!(person.to_string(), r#"Person(name="ab")"#);
//!
//! let error = person.set("name", "toolong!").unwrap_err();
//! assert_eq!(error.to_string(), "Attribute `name` length should be <= 5");
//! assert_eq!(person.get("name"), Some(json!("ab")));
//! ```

pub mod constructor;
pub mod instance;
pub mod options;
pub mod schema;

pub use constructor::Constructor;
pub use instance::Instance;
pub use options::{SchemaOptions, UnknownFields, ViolationStrategy};
pub use schema::{Schema, SchemaBuilder};
