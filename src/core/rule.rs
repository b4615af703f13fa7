//! The rule contract: configure, validate, mutate.

use super::error::{ConfigurationError, RuleError};
use super::params::Params;
use super::value::Value;
use crate::container::Instance;

/// What a rule's validate hook did with the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value passes unchanged.
    Keep,
    /// The value passes, normalized to the replacement. Later rules in the
    /// chain see the replacement.
    Replace(Value),
}

/// What a rule's mutate hook did with the value on read.
///
/// `NotImplemented` is distinct from returning the same value: it tells the
/// engine the rule has no read-time transform at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    NotImplemented,
    Value(Value),
}

/// Per-call view handed to rule hooks: the bound field name and the
/// container instance the value belongs to.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    field: &'a str,
    instance: &'a Instance,
}

impl<'a> Context<'a> {
    pub fn new(field: &'a str, instance: &'a Instance) -> Self {
        Self { field, instance }
    }

    /// Name of the field the rule is bound to.
    pub fn field(&self) -> &'a str {
        self.field
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Stored value of another field, if it was already assigned.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.instance.raw(field)
    }
}

/// A named validation/transform unit.
///
/// Rules hold their configuration but never per-instance data: the instance
/// and value arrive as arguments on every call. A rule object is owned by a
/// single field descriptor and is only mutated during configure.
///
/// # Example
///
/// ```rust
/// use fieldrule::core::{Context, Outcome, Rule, RuleError, Value};
///
/// #[derive(Default)]
/// struct NotBlank;
///
/// impl Rule for NotBlank {
///     fn name(&self) -> &str {
///         "NotBlank"
///     }
///
///     fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
///         match value.as_str() {
///             Some(s) if s.trim().is_empty() => Err(RuleError::invalid(format!(
///                 "Attribute `{}` must not be blank",
///                 ctx.field()
///             ))),
///             _ => Ok(Outcome::Keep),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Display name used in reprs and composition errors.
    fn name(&self) -> &str;

    /// Names of the parameters configure consumes.
    fn parameters(&self) -> &'static [&'static str] {
        &[]
    }

    /// Store configuration. Receives only the parameters named by
    /// [`Rule::parameters`] that were actually supplied.
    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        let _ = params;
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError>;

    fn mutate(&self, ctx: &Context<'_>, value: &Value) -> Mutation {
        let _ = (ctx, value);
        Mutation::NotImplemented
    }

    /// Whether the rule computes the field itself. Derived fields are left out
    /// of generated constructors and never read from input mappings.
    fn derived(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Schema;
    use serde_json::json;

    #[derive(Default)]
    struct Even;

    impl Rule for Even {
        fn name(&self) -> &str {
            "Even"
        }

        fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
            match value.as_i64() {
                Some(n) if n % 2 == 0 => Ok(Outcome::Keep),
                _ => Err(RuleError::invalid(format!("`{}` must be even", ctx.field()))),
            }
        }
    }

    #[test]
    fn default_hooks_are_no_ops() {
        let mut rule = Even;
        assert!(rule.parameters().is_empty());
        assert!(rule.configure(Params::new()).is_ok());
        assert!(!rule.derived());

        let instance = Instance::empty(Schema::builder("Empty").build().unwrap());
        let ctx = Context::new("n", &instance);
        assert_eq!(rule.mutate(&ctx, &json!(2)), Mutation::NotImplemented);
    }

    #[test]
    fn validate_reports_field_name() {
        let instance = Instance::empty(Schema::builder("Empty").build().unwrap());
        let ctx = Context::new("count", &instance);

        assert_eq!(Even.validate(&ctx, &json!(4)), Ok(Outcome::Keep));
        assert_eq!(
            Even.validate(&ctx, &json!(3)),
            Err(RuleError::invalid("`count` must be even"))
        );
    }
}
