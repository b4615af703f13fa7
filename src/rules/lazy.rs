//! Derived fields.

use crate::core::{ConfigurationError, Context, FactoryFn, Outcome, Params, Rule, RuleError, Value};
use std::fmt;

/// Computes the field from the rest of the instance with `factory(instance)`.
///
/// The field is derived: constructors leave it out and it is computed when
/// the instance is built. Assigning anything but `null` halts validation;
/// assigning `null` recomputes it.
#[derive(Clone, Default)]
pub struct LazyLoad {
    factory: Option<FactoryFn>,
}

impl Rule for LazyLoad {
    fn name(&self) -> &str {
        "LazyLoad"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["factory"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        let factory = params
            .factory("factory")?
            .ok_or_else(|| ConfigurationError::missing_parameter("LazyLoad", "factory"))?;
        self.factory = Some(factory);
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        if !value.is_null() {
            return Err(RuleError::halt(format!(
                "`{}` is a `LazyLoad` field, you're not allowed to set it directly",
                ctx.field()
            )));
        }
        match &self.factory {
            Some(factory) => Ok(Outcome::Replace(factory(ctx.instance()))),
            None => Ok(Outcome::Keep),
        }
    }

    fn derived(&self) -> bool {
        true
    }
}

impl fmt::Debug for LazyLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyLoad")
            .field("configured", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::instance;
    use serde_json::json;

    #[test]
    fn null_placeholder_is_replaced_by_factory_output() {
        let mut rule = LazyLoad::default();
        rule.configure(Params::new().with_factory("factory", |_| json!(42)))
            .unwrap();
        let instance = instance();
        let ctx = Context::new("answer", &instance);

        assert_eq!(
            rule.validate(&ctx, &Value::Null),
            Ok(Outcome::Replace(json!(42)))
        );
        assert!(rule.derived());
    }

    #[test]
    fn direct_assignment_halts() {
        let rule = LazyLoad::default();
        let instance = instance();
        let ctx = Context::new("answer", &instance);

        assert_eq!(
            rule.validate(&ctx, &json!(1)),
            Err(RuleError::halt(
                "`answer` is a `LazyLoad` field, you're not allowed to set it directly"
            ))
        );
    }

    #[test]
    fn factory_is_required() {
        let mut rule = LazyLoad::default();
        assert!(rule.configure(Params::new()).is_err());
        assert!(rule.configure(Params::new().with("factory", 1)).is_err());
    }
}
