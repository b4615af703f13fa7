//! Boundary errors raised by rules and field descriptors.

use std::fmt;
use thiserror::Error;

/// One or more rules rejected a value.
///
/// Carries every individual message in chain order so a caller can report
/// all problems from a single attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", render_errors(.errors))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Error with a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append the messages of another error, keeping order.
    pub fn extend(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }
}

fn render_errors(errors: &[String]) -> String {
    match errors {
        [] => "Validation failed".to_string(),
        [single] => single.clone(),
        many => format!("{} validation errors: {}", many.len(), many.join("; ")),
    }
}

/// A rule's configure phase rejected the supplied parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Configuration failed: {message}")]
pub struct ConfigurationError {
    pub message: String,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// A parameter was supplied with the wrong shape.
    pub fn invalid_parameter(name: &str, expected: &str) -> Self {
        Self::new(format!("Parameter `{name}` should be {expected}"))
    }

    pub fn missing_parameter(rule: &str, name: &str) -> Self {
        Self::new(format!("Rule `{rule}` requires parameter `{name}`"))
    }
}

/// Failure reported by a single rule's validate hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The value is rejected; the message is collected with the rest of the chain.
    Invalid(String),

    /// The rule refuses to run at all. Propagates immediately and is never
    /// aggregated with other messages.
    Halt(String),
}

impl RuleError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn halt(message: impl Into<String>) -> Self {
        Self::Halt(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Invalid(message) | Self::Halt(message) => message,
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_displays_its_message() {
        let error = ValidationError::single("Attribute `name` length should be >= 2");
        assert_eq!(error.to_string(), "Attribute `name` length should be >= 2");
        assert_eq!(error.len(), 1);
    }

    #[test]
    fn multiple_errors_display_in_order() {
        let error = ValidationError::new(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(error.to_string(), "2 validation errors: first; second");
    }

    #[test]
    fn extend_keeps_order() {
        let mut error = ValidationError::single("a");
        error.extend(ValidationError::new(vec!["b".to_string(), "c".to_string()]));
        assert_eq!(error.errors, vec!["a", "b", "c"]);
    }

    #[test]
    fn configuration_error_helpers() {
        let error = ConfigurationError::invalid_parameter("min_size", "a non-negative integer");
        assert_eq!(
            error.to_string(),
            "Configuration failed: Parameter `min_size` should be a non-negative integer"
        );

        let error = ConfigurationError::missing_parameter("LazyLoad", "factory");
        assert_eq!(error.message, "Rule `LazyLoad` requires parameter `factory`");
    }

    #[test]
    fn rule_error_exposes_message() {
        assert_eq!(RuleError::invalid("bad").message(), "bad");
        assert_eq!(RuleError::halt("stop").to_string(), "stop");
    }
}
