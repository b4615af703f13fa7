//! Read-time transforms applied in the mutate phase.

use crate::core::{
    display_value, ConfigurationError, Context, Mutation, Outcome, Params, Rule, RuleError,
    TransformFn, Value,
};
use std::fmt;

/// Renders the value through `template` on read.
///
/// `{value}` and `{field_name}` are substituted; the stored value is left
/// as assigned.
#[derive(Debug, Clone, Default)]
pub struct Format {
    template: String,
}

impl Rule for Format {
    fn name(&self) -> &str {
        "Format"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["template"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        self.template = params
            .string("template")?
            .ok_or_else(|| ConfigurationError::missing_parameter("Format", "template"))?;
        Ok(())
    }

    fn validate(&self, _ctx: &Context<'_>, _value: &Value) -> Result<Outcome, RuleError> {
        Ok(Outcome::Keep)
    }

    fn mutate(&self, ctx: &Context<'_>, value: &Value) -> Mutation {
        let rendered = self
            .template
            .replace("{field_name}", ctx.field())
            .replace("{value}", &display_value(value));
        Mutation::Value(Value::String(rendered))
    }
}

/// Maps the value with `transform(instance, value)` on read.
///
/// # Example
///
/// ```rust
/// use fieldrule::composition::combine;
/// use fieldrule::container::{Instance, Schema};
/// use fieldrule::rules::{Format, Transform};
/// use fieldrule::{Params, RuleType};
/// use serde_json::{json, Value};
///
/// let shout = combine([RuleType::of::<Transform>(), RuleType::of::<Format>()]).unwrap();
/// let schema = Schema::builder("Greeting")
///     .field(
///         "word",
///         &shout,
///         Params::new()
///             .with_transform("transform", |_, value| {
///                 json!(value.as_str().unwrap_or_default().to_uppercase())
///             })
///             .with("template", "{value}!"),
///     )
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let greeting = Instance::from_values(&schema, [("word", json!("hi"))]).unwrap();
/// assert_eq!(greeting.get("word"), Some(json!("HI!")));
/// assert_eq!(greeting.raw("word"), Some(&Value::from("hi")));
/// ```
#[derive(Clone, Default)]
pub struct Transform {
    transform: Option<TransformFn>,
}

impl Rule for Transform {
    fn name(&self) -> &str {
        "Transform"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["transform"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        let transform = params
            .transform("transform")?
            .ok_or_else(|| ConfigurationError::missing_parameter("Transform", "transform"))?;
        self.transform = Some(transform);
        Ok(())
    }

    fn validate(&self, _ctx: &Context<'_>, _value: &Value) -> Result<Outcome, RuleError> {
        Ok(Outcome::Keep)
    }

    fn mutate(&self, ctx: &Context<'_>, value: &Value) -> Mutation {
        match &self.transform {
            Some(transform) => Mutation::Value(transform(ctx.instance(), value)),
            None => Mutation::NotImplemented,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("configured", &self.transform.is_some())
            .finish()
    }
}
