//! String formats normalized on assignment: datetimes and UUIDs.

use crate::core::{ConfigurationError, Context, Mutation, Outcome, Params, Rule, RuleError, Value};
use chrono::format::{Item, StrftimeItems};
use chrono::{SecondsFormat, Utc};

fn parse_datetime(value: &Value) -> Option<chrono::DateTime<Utc>> {
    let text = value.as_str()?;
    chrono::DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|datetime| datetime.with_timezone(&Utc))
}

/// Requires an RFC 3339 timestamp and stores it normalized to UTC.
///
/// With a `format` (strftime syntax), reads render the timestamp with it.
#[derive(Debug, Clone, Default)]
pub struct DateTime {
    format: Option<String>,
}

impl Rule for DateTime {
    fn name(&self) -> &str {
        "DateTime"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["format"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        let format = params.string("format")?;
        if let Some(format) = &format {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(ConfigurationError::new(format!(
                    "Parameter `format` is not a valid strftime format: `{format}`"
                )));
            }
        }
        self.format = format;
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        let datetime = parse_datetime(value).ok_or_else(|| {
            RuleError::invalid(format!(
                "Attribute `{}` should be an RFC 3339 datetime",
                ctx.field()
            ))
        })?;
        let normalized = datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        Ok(Outcome::Replace(Value::String(normalized)))
    }

    fn mutate(&self, _ctx: &Context<'_>, value: &Value) -> Mutation {
        match (&self.format, parse_datetime(value)) {
            (Some(format), Some(datetime)) => {
                Mutation::Value(Value::String(datetime.format(format).to_string()))
            }
            _ => Mutation::NotImplemented,
        }
    }
}

/// Requires a UUID string and stores it in lowercase hyphenated form.
#[derive(Debug, Clone, Default)]
pub struct Uuid;

impl Rule for Uuid {
    fn name(&self) -> &str {
        "Uuid"
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        let parsed = value
            .as_str()
            .and_then(|text| uuid::Uuid::parse_str(text).ok())
            .ok_or_else(|| {
                RuleError::invalid(format!("Attribute `{}` should be a UUID", ctx.field()))
            })?;
        Ok(Outcome::Replace(Value::String(
            parsed.hyphenated().to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::rules::testing::instance;
    use serde_json::json;

    #[test]
    fn datetime_is_normalized_to_utc() {
        let rule = DateTime::default();
        let instance = instance();
        let ctx = Context::new("created", &instance);

        assert_eq!(
            rule.validate(&ctx, &json!("2024-03-01T12:30:00+02:00")),
            Ok(Outcome::Replace(json!("2024-03-01T10:30:00Z")))
        );
        assert_eq!(
            rule.validate(&ctx, &json!("yesterday")),
            Err(RuleError::invalid(
                "Attribute `created` should be an RFC 3339 datetime"
            ))
        );
        assert!(rule.validate(&ctx, &json!(1_700_000_000)).is_err());
    }

    #[test]
    fn datetime_format_applies_on_read() {
        let mut rule = DateTime::default();
        rule.configure(params! { format: "%Y-%m-%d" }).unwrap();
        let instance = instance();
        let ctx = Context::new("created", &instance);

        assert_eq!(
            rule.mutate(&ctx, &json!("2024-03-01T10:30:00Z")),
            Mutation::Value(json!("2024-03-01"))
        );
        assert_eq!(
            DateTime::default().mutate(&ctx, &json!("2024-03-01T10:30:00Z")),
            Mutation::NotImplemented
        );
    }

    #[test]
    fn datetime_rejects_bad_format() {
        let mut rule = DateTime::default();
        assert!(rule.configure(params! { format: "%Q" }).is_err());
    }

    #[test]
    fn uuid_is_normalized() {
        let instance = instance();
        let ctx = Context::new("id", &instance);
        let id = uuid::Uuid::new_v4();

        assert_eq!(
            Uuid.validate(&ctx, &json!(id.simple().to_string().to_uppercase())),
            Ok(Outcome::Replace(json!(id.to_string())))
        );
        assert_eq!(
            Uuid.validate(&ctx, &json!("not-a-uuid")),
            Err(RuleError::invalid("Attribute `id` should be a UUID"))
        );
    }
}
