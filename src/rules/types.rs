//! Kind checks: `Type` and its fixed-kind variants.

use crate::core::{
    display_value, ConfigurationError, Context, Outcome, Params, Rule, RuleError, Value, ValueKind,
};

fn check_kinds(ctx: &Context<'_>, value: &Value, kinds: &[ValueKind]) -> Result<(), RuleError> {
    if kinds.iter().all(|kind| kind.matches(value)) {
        return Ok(());
    }
    let names = kinds
        .iter()
        .map(ValueKind::name)
        .collect::<Vec<_>>()
        .join(", ");
    Err(RuleError::invalid(format!(
        "Attribute `{}` should be an instance of `{names}`",
        ctx.field()
    )))
}

/// Requires the value to match every kind in `types`.
#[derive(Debug, Clone, Default)]
pub struct Type {
    types: Vec<ValueKind>,
}

impl Rule for Type {
    fn name(&self) -> &str {
        "Type"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["types"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        self.types = params
            .kinds("types")?
            .ok_or_else(|| ConfigurationError::missing_parameter("Type", "types"))?;
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        check_kinds(ctx, value, &self.types)?;
        Ok(Outcome::Keep)
    }
}

/// Requires a string.
#[derive(Debug, Clone, Default)]
pub struct Text;

impl Rule for Text {
    fn name(&self) -> &str {
        "Text"
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        check_kinds(ctx, value, &[ValueKind::String])?;
        Ok(Outcome::Keep)
    }
}

/// Requires an array.
#[derive(Debug, Clone, Default)]
pub struct List;

impl Rule for List {
    fn name(&self) -> &str {
        "List"
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        check_kinds(ctx, value, &[ValueKind::Array])?;
        Ok(Outcome::Keep)
    }
}

/// Requires an object, optionally holding every key in `required_keys`.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    required_keys: Vec<String>,
}

impl Rule for Dict {
    fn name(&self) -> &str {
        "Dict"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["required_keys"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        self.required_keys = params.strings("required_keys")?.unwrap_or_default();
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        check_kinds(ctx, value, &[ValueKind::Object])?;
        let missing = self
            .required_keys
            .iter()
            .any(|key| value.get(key.as_str()).is_none());
        if missing {
            return Err(RuleError::invalid(format!(
                "Missing required keys for value in `{}` field",
                ctx.field()
            )));
        }
        Ok(Outcome::Keep)
    }
}

#[derive(Debug, Clone)]
struct Bound {
    limit: f64,
    shown: String,
}

impl Bound {
    fn from_params(params: &Params, name: &str) -> Result<Option<Self>, ConfigurationError> {
        let Some(limit) = params.f64(name)? else {
            return Ok(None);
        };
        let shown = params.value(name)?.map(display_value).unwrap_or_default();
        Ok(Some(Self { limit, shown }))
    }
}

/// Requires a number within `min_value..=max_value`.
#[derive(Debug, Clone, Default)]
pub struct Number {
    min_value: Option<Bound>,
    max_value: Option<Bound>,
}

impl Rule for Number {
    fn name(&self) -> &str {
        "Number"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["min_value", "max_value"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        self.min_value = Bound::from_params(&params, "min_value")?;
        self.max_value = Bound::from_params(&params, "max_value")?;
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        check_kinds(ctx, value, &[ValueKind::Number])?;
        let Some(number) = value.as_f64() else {
            return Ok(Outcome::Keep);
        };
        match (&self.min_value, &self.max_value) {
            (Some(min), _) if number < min.limit => Err(RuleError::invalid(format!(
                "Attribute `{}` should be >= {}",
                ctx.field(),
                min.shown
            ))),
            (_, Some(max)) if number > max.limit => Err(RuleError::invalid(format!(
                "Attribute `{}` should be <= {}",
                ctx.field(),
                max.shown
            ))),
            _ => Ok(Outcome::Keep),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::rules::testing::instance;
    use serde_json::json;

    fn configured<R: Rule + Default>(params: Params) -> R {
        let mut rule = R::default();
        rule.configure(params).unwrap();
        rule
    }

    #[test]
    fn type_requires_every_listed_kind() {
        let rule: Type = configured(params! { types: ["integer", "number"] });
        let instance = instance();
        let ctx = Context::new("count", &instance);

        assert!(rule.validate(&ctx, &json!(3)).is_ok());
        assert_eq!(
            rule.validate(&ctx, &json!(3.5)),
            Err(RuleError::invalid(
                "Attribute `count` should be an instance of `integer, number`"
            ))
        );
    }

    #[test]
    fn type_requires_types_parameter() {
        let mut rule = Type::default();
        assert_eq!(
            rule.configure(Params::new()).unwrap_err(),
            ConfigurationError::missing_parameter("Type", "types")
        );
        assert!(rule.configure(params! { types: "tuple" }).is_err());
    }

    #[test]
    fn text_and_list_check_their_kind() {
        let instance = instance();
        let ctx = Context::new("value", &instance);

        assert!(Text.validate(&ctx, &json!("ab")).is_ok());
        assert_eq!(
            Text.validate(&ctx, &json!(1)),
            Err(RuleError::invalid("Attribute `value` should be an instance of `string`"))
        );
        assert!(List.validate(&ctx, &json!([1])).is_ok());
        assert!(List.validate(&ctx, &json!("[1]")).is_err());
    }

    #[test]
    fn dict_checks_required_keys() {
        let rule: Dict = configured(params! { required_keys: ["host", "port"] });
        let instance = instance();
        let ctx = Context::new("server", &instance);

        assert!(rule
            .validate(&ctx, &json!({"host": "localhost", "port": 80}))
            .is_ok());
        assert_eq!(
            rule.validate(&ctx, &json!({"host": "localhost"})),
            Err(RuleError::invalid("Missing required keys for value in `server` field"))
        );
        assert!(rule.validate(&ctx, &json!(["host", "port"])).is_err());
    }

    #[test]
    fn number_checks_kind_then_range() {
        let rule: Number = configured(params! { min_value: 0, max_value: 1.5 });
        let instance = instance();
        let ctx = Context::new("ratio", &instance);

        assert!(rule.validate(&ctx, &json!(1)).is_ok());
        assert_eq!(
            rule.validate(&ctx, &json!(-1)),
            Err(RuleError::invalid("Attribute `ratio` should be >= 0"))
        );
        assert_eq!(
            rule.validate(&ctx, &json!(2)),
            Err(RuleError::invalid("Attribute `ratio` should be <= 1.5"))
        );
        assert_eq!(
            rule.validate(&ctx, &json!("1")),
            Err(RuleError::invalid("Attribute `ratio` should be an instance of `number`"))
        );
    }
}
