//! Caller-supplied predicate with an optional normalizing default.

use crate::core::{
    display_value, ConfigurationError, Context, Outcome, Param, Params, PredicateFn, Rule,
    RuleError, TransformFn, Value,
};
use std::fmt;

const DEFAULT_MESSAGE: &str = "Predicate {predicate} failed for field: {field_name}";

/// Replacement used when the predicate fails.
#[derive(Clone)]
enum Fallback {
    Value(Value),
    Computed(TransformFn),
}

/// Checks the value with `predicate(instance, value)`.
///
/// When the predicate fails and a `default` is configured, the value is
/// replaced by the default (a plain value, or a transform of the rejected
/// value) instead of being rejected. Otherwise `error_message` is reported,
/// with `{predicate}`, `{field_name}` and `{value}` filled in.
///
/// # Example
///
/// ```rust
/// use fieldrule::container::{Instance, Schema};
/// use fieldrule::rules::Predicate;
/// use fieldrule::{Params, RuleType};
/// use serde_json::json;
///
/// let schema = Schema::builder("Order")
///     .field(
///         "quantity",
///         &RuleType::of::<Predicate>(),
///         Params::new()
///             .with_predicate("predicate", "positive", |_, value| {
///                 value.as_i64().is_some_and(|n| n > 0)
///             })
///             .with("default", 1),
///     )
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let order = Instance::from_values(&schema, [("quantity", json!(-4))]).unwrap();
/// assert_eq!(order.get("quantity"), Some(json!(1)));
/// ```
#[derive(Clone, Default)]
pub struct Predicate {
    check: Option<(String, PredicateFn)>,
    fallback: Option<Fallback>,
    error_message: Option<String>,
}

impl Predicate {
    fn message(&self, label: &str, field: &str, value: &Value) -> String {
        self.error_message
            .as_deref()
            .unwrap_or(DEFAULT_MESSAGE)
            .replace("{predicate}", label)
            .replace("{field_name}", field)
            .replace("{value}", &display_value(value))
    }
}

impl Rule for Predicate {
    fn name(&self) -> &str {
        "Predicate"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["predicate", "default", "error_message"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        self.check = Some(
            params
                .predicate("predicate")?
                .ok_or_else(|| ConfigurationError::missing_parameter("Predicate", "predicate"))?,
        );
        self.fallback = match params.get("default") {
            None => None,
            Some(Param::Value(value)) => Some(Fallback::Value(value.clone())),
            Some(Param::Transform(transform)) => Some(Fallback::Computed(transform.clone())),
            Some(_) => {
                return Err(ConfigurationError::invalid_parameter(
                    "default",
                    "a plain value or a transform",
                ))
            }
        };
        self.error_message = params.string("error_message")?;
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        let Some((label, check)) = &self.check else {
            return Ok(Outcome::Keep);
        };
        if check(ctx.instance(), value) {
            return Ok(Outcome::Keep);
        }
        match &self.fallback {
            Some(Fallback::Value(default)) => Ok(Outcome::Replace(default.clone())),
            Some(Fallback::Computed(transform)) => {
                Ok(Outcome::Replace(transform(ctx.instance(), value)))
            }
            None => Err(RuleError::invalid(self.message(label, ctx.field(), value))),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("predicate", &self.check.as_ref().map(|(label, _)| label))
            .field("error_message", &self.error_message)
            .finish()
    }
}
