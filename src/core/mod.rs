//! Core rule contract and the values it operates on.
//!
//! This module contains everything a rule implementation needs:
//! - The `Rule` trait with its configure, validate and mutate hooks
//! - `Params`, the named parameters consumed during configure
//! - `Value` / `ValueKind`, the dynamic field values rules inspect
//! - The boundary errors rules and descriptors raise
//!
//! Rules never store per-instance data; the container instance and value are
//! passed explicitly on every call through a `Context`.

mod error;
mod params;
mod rule;
mod value;

pub use error::{ConfigurationError, RuleError, ValidationError};
pub use params::{FactoryFn, Param, Params, PredicateFn, TransformFn};
pub use rule::{Context, Mutation, Outcome, Rule};
pub use value::{display_value, length_of, Mapping, Value, ValueKind};
