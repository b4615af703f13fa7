//! Field descriptor: binds a rule chain to one field name.

use super::cache::InvocationCache;
use crate::composition::{RuleId, RuleType};
use crate::container::Instance;
use crate::core::{
    ConfigurationError, Context, Mutation, Outcome, Params, Rule, RuleError, ValidationError,
    Value,
};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Orchestrates the configure, validate and mutate phases of one field.
///
/// The descriptor owns one configured rule object per distinct rule in its
/// rule type's arena and runs them in the rule type's chain order. It is
/// built once, at schema definition time, and only read afterwards.
///
/// # Example
///
/// ```rust
/// use fieldrule::composition::combine;
/// use fieldrule::container::{Instance, Schema};
/// use fieldrule::descriptor::FieldDescriptor;
/// use fieldrule::rules::{Sized, Type};
/// use fieldrule::{params, RuleType};
/// use serde_json::json;
///
/// let rule = combine([RuleType::of::<Sized>(), RuleType::of::<Type>()]).unwrap();
/// let field = FieldDescriptor::new(
///     "name",
///     &rule,
///     params! { min_size: 2, max_size: 5, types: ["string"] },
/// )
/// .unwrap();
///
/// let schema = Schema::builder("Person").add_field(field).build().unwrap();
/// let person = Instance::from_values(&schema, [("name", json!("ab"))]).unwrap();
/// assert_eq!(person.get("name"), Some(json!("ab")));
///
/// let error = Instance::from_values(&schema, [("name", json!(123))]).unwrap_err();
/// assert_eq!(
///     error.to_string(),
///     "Attribute `name` should be an instance of `string`"
/// );
/// ```
pub struct FieldDescriptor {
    name: String,
    rule_type: RuleType,
    rules: Vec<Box<dyn Rule>>,
    configured: InvocationCache,
}

impl FieldDescriptor {
    /// Bind `rule_type` to `name` and configure every rule in the chain.
    ///
    /// Parameters no rule declares are rejected.
    pub fn new(
        name: impl Into<String>,
        rule_type: &RuleType,
        params: Params,
    ) -> Result<Self, ConfigurationError> {
        let mut descriptor = Self::unconfigured(name, rule_type);
        let leftover = descriptor.configure(params)?;
        if !leftover.is_empty() {
            let names = leftover
                .names()
                .map(|name| format!("`{name}`"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ConfigurationError::new(format!(
                "Field `{}` got unexpected parameter(s): {}",
                descriptor.name, names
            )));
        }
        Ok(descriptor)
    }

    /// Bind `rule_type` to `name` without running configure yet.
    pub fn unconfigured(name: impl Into<String>, rule_type: &RuleType) -> Self {
        let rules = rule_type
            .nodes()
            .iter()
            .map(|node| node.instantiate())
            .collect();
        Self {
            name: name.into(),
            rule_type: rule_type.clone(),
            rules,
            configured: InvocationCache::new(),
        }
    }

    /// Run configure for every rule in chain order that has not been
    /// configured yet, each consuming the parameters it declares.
    ///
    /// Returns the parameters nobody consumed. When a rule fails, its entry
    /// is rolled back so calling `configure` again with corrected parameters
    /// re-runs that rule while skipping the ones that already succeeded.
    pub fn configure(&mut self, mut params: Params) -> Result<Params, ConfigurationError> {
        let rule_type = self.rule_type.clone();
        for &index in rule_type.chain() {
            let id = rule_type.nodes()[index].id();
            if !self.configured.begin(id) {
                tracing::trace!(field = %self.name, rule = rule_type.nodes()[index].name(), "configure already ran");
                continue;
            }

            let rule = &mut self.rules[index];
            let own = params.take(rule.parameters());
            if let Err(error) = rule.configure(own) {
                self.configured.rollback(id);
                tracing::debug!(field = %self.name, rule = rule.name(), %error, "configure failed");
                return Err(error);
            }
        }
        Ok(params)
    }

    /// Run the validate phase with a fresh invocation cache.
    ///
    /// Every rule sees the value as left by the rules before it. All
    /// rejections are collected; the final value is returned only when no
    /// rule rejected it.
    pub fn validate(&self, instance: &Instance, value: Value) -> Result<Value, ValidationError> {
        let mut cache = InvocationCache::new();
        self.validate_with(instance, value, &mut cache)
    }

    /// Run the validate phase, skipping rules already recorded in `cache`.
    pub fn validate_with(
        &self,
        instance: &Instance,
        value: Value,
        cache: &mut InvocationCache,
    ) -> Result<Value, ValidationError> {
        self.run_validate(instance, value, cache)
            .map_err(Rejection::into_error)
    }

    pub(crate) fn run_validate(
        &self,
        instance: &Instance,
        value: Value,
        cache: &mut InvocationCache,
    ) -> Result<Value, Rejection> {
        let ctx = Context::new(&self.name, instance);
        let mut value = value;
        let mut checks: Vec<Validation<(), NonEmptyVec<String>>> = Vec::new();

        for &index in self.rule_type.chain() {
            let id = self.rule_id(index);
            if !cache.begin(id) {
                continue;
            }

            let rule = &self.rules[index];
            tracing::trace!(field = %self.name, rule = rule.name(), "validate");
            match rule.validate(&ctx, &value) {
                Ok(Outcome::Keep) => checks.push(Validation::success(())),
                Ok(Outcome::Replace(replacement)) => {
                    value = replacement;
                    checks.push(Validation::success(()));
                }
                Err(RuleError::Invalid(message)) => checks.push(Validation::fail(message)),
                Err(RuleError::Halt(message)) => {
                    cache.rollback(id);
                    tracing::debug!(field = %self.name, rule = rule.name(), %message, "validate halted");
                    return Err(Rejection::Halted(ValidationError::single(message)));
                }
            }
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(value),
            Validation::Failure(errors) => {
                let errors: Vec<String> = errors.iter().cloned().collect();
                tracing::debug!(field = %self.name, count = errors.len(), "validation failed");
                Err(Rejection::Invalid(ValidationError::new(errors)))
            }
        }
    }

    /// Run the mutate phase with a fresh invocation cache and return the
    /// value a reader sees. Stored state is never touched.
    pub fn mutate(&self, instance: &Instance, value: &Value) -> Value {
        let mut cache = InvocationCache::new();
        self.mutate_with(instance, value, &mut cache)
    }

    /// Run the mutate phase, skipping rules already recorded in `cache`.
    pub fn mutate_with(&self, instance: &Instance, value: &Value, cache: &mut InvocationCache) -> Value {
        let ctx = Context::new(&self.name, instance);
        let mut current = value.clone();

        for &index in self.rule_type.chain() {
            if !cache.begin(self.rule_id(index)) {
                continue;
            }
            if let Mutation::Value(next) = self.rules[index].mutate(&ctx, &current) {
                current = next;
            }
        }
        current
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule_type(&self) -> &RuleType {
        &self.rule_type
    }

    /// Names of the rules in execution order.
    pub fn chain_names(&self) -> Vec<&str> {
        self.rule_type.chain_names()
    }

    /// Rules whose configure phase completed.
    pub fn configured(&self) -> &InvocationCache {
        &self.configured
    }

    /// Whether every rule in the chain has been configured.
    pub fn is_configured(&self) -> bool {
        self.rule_type
            .chain()
            .iter()
            .all(|&index| self.configured.contains(self.rule_id(index)))
    }

    /// Whether some rule computes this field's value.
    pub fn is_derived(&self) -> bool {
        self.rules.iter().any(|rule| rule.derived())
    }

    fn rule_id(&self, index: usize) -> RuleId {
        self.rule_type.nodes()[index].id()
    }
}

/// Why a field refused a value.
#[derive(Debug)]
pub(crate) enum Rejection {
    /// Rules rejected the value; every message was collected.
    Invalid(ValidationError),
    /// A rule halted the chain; nothing after it ran.
    Halted(ValidationError),
}

impl Rejection {
    pub(crate) fn into_error(self) -> ValidationError {
        match self {
            Self::Invalid(error) | Self::Halted(error) => error,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("rule", &self.rule_type.to_string())
            .field("chain", &self.chain_names())
            .finish()
    }
}
