//! Positional constructor generated from a schema.

use super::instance::Instance;
use super::schema::Schema;
use crate::core::{Mapping, ValidationError, Value};
use std::fmt;
use std::sync::Arc;

/// Builds instances from positional arguments, one per non-derived field in
/// declaration order.
#[derive(Clone)]
pub struct Constructor {
    schema: Arc<Schema>,
    parameters: Vec<String>,
}

impl Constructor {
    pub fn new(schema: &Arc<Schema>) -> Self {
        let parameters = schema
            .fields()
            .iter()
            .filter(|field| !field.is_derived())
            .map(|field| field.name().to_string())
            .collect();
        Self {
            schema: Arc::clone(schema),
            parameters,
        }
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// `Person(name, age)`
    pub fn signature(&self) -> String {
        format!("{}({})", self.schema.name(), self.parameters.join(", "))
    }

    pub fn call<I>(&self, args: I) -> Result<Instance, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        if args.len() != self.parameters.len() {
            return Err(ValidationError::single(format!(
                "{}() takes {} argument(s) but {} were given",
                self.schema.name(),
                self.parameters.len(),
                args.len()
            )));
        }

        let mapping: Mapping = self.parameters.iter().cloned().zip(args).collect();
        Instance::new(&self.schema, mapping)
    }
}

impl Schema {
    /// The positional constructor of this container type.
    pub fn constructor(self: &Arc<Self>) -> Constructor {
        Constructor::new(self)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Params;
    use crate::params;
    use crate::rules::{LazyLoad, Number, Text};
    use crate::RuleType;
    use serde_json::json;

    fn schema() -> Arc<Schema> {
        Schema::builder("Person")
            .field("name", &RuleType::of::<Text>(), Params::new())
            .unwrap()
            .field(
                "greeting",
                &RuleType::of::<LazyLoad>(),
                Params::new().with_factory("factory", |instance| {
                    let name = instance.raw("name").and_then(Value::as_str).unwrap_or_default();
                    json!(format!("Hello, {name}"))
                }),
            )
            .unwrap()
            .field("age", &RuleType::of::<Number>(), params! { min_value: 0 })
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn parameters_skip_derived_fields() {
        let constructor = schema().constructor();

        assert_eq!(constructor.parameters(), &["name".to_string(), "age".to_string()]);
        assert_eq!(constructor.signature(), "Person(name, age)");
    }

    #[test]
    fn call_builds_instance_positionally() {
        let instance = schema().constructor().call([json!("Ada"), json!(36)]).unwrap();

        assert_eq!(instance.raw("age"), Some(&json!(36)));
        assert_eq!(instance.get("greeting"), Some(json!("Hello, Ada")));
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let error = schema().constructor().call([json!("Ada")]).unwrap_err();

        assert_eq!(
            error.errors,
            vec!["Person() takes 2 argument(s) but 1 were given"]
        );
    }

    #[test]
    fn call_reports_rule_failures() {
        let error = schema().constructor().call([json!("Ada"), json!(-1)]).unwrap_err();

        assert_eq!(error.errors, vec!["Attribute `age` should be >= 0"]);
    }
}
