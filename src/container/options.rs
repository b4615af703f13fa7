//! Schema-level options.

use serde::{Deserialize, Serialize};

/// What construction does with mapping keys that name no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Fail construction with one message per unknown key.
    #[default]
    Reject,

    /// Drop unknown keys, logging a warning.
    Ignore,
}

/// How construction reports fields that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationStrategy {
    /// Stop at the first failing field; its error lists every rule that
    /// rejected that field.
    #[default]
    FirstFailingField,

    /// Validate every field and report all failures, in declaration order,
    /// as one error. A halting rule still stops construction; failures
    /// gathered before it are reported ahead of its message.
    CollectAll,
}

/// Options fixed when a schema is defined.
///
/// Deserializable so they can live in a configuration file next to the data
/// they govern; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    pub unknown_fields: UnknownFields,
    pub on_violation: ViolationStrategy,
}
