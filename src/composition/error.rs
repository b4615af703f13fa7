//! Composition errors.

use thiserror::Error;

/// A combination of rules has no consistent execution order, or is
/// structurally malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Composition failed: {message}")]
pub struct CompositionError {
    pub message: String,
}

impl CompositionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new("Cannot combine an empty list of rules")
    }

    pub(crate) fn duplicate(name: &str) -> Self {
        Self::new(format!("Rule `{name}` is listed more than once"))
    }

    pub(crate) fn inconsistent(names: &[String]) -> Self {
        let names = names
            .iter()
            .map(|name| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(format!("Cannot create a consistent rule order for {names}"))
    }
}
