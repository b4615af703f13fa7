//! Static descriptor table of a container type.

use super::options::{SchemaOptions, UnknownFields, ViolationStrategy};
use crate::composition::RuleType;
use crate::core::{ConfigurationError, Params};
use crate::descriptor::FieldDescriptor;
use std::fmt;
use std::sync::Arc;

/// The fields of a container type, in declaration order, plus its options.
///
/// Built once by [`SchemaBuilder`] and shared read-only (`Arc<Schema>`) by
/// every instance of the type.
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    options: SchemaOptions,
}

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldDescriptor::name)
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for defining a container type.
///
/// # Example
///
/// ```rust
/// use fieldrule::container::{Schema, ViolationStrategy};
/// use fieldrule::rules::{Number, Text};
/// use fieldrule::{params, Params, RuleType};
///
/// let schema = Schema::builder("Person")
///     .field("name", &RuleType::of::<Text>(), Params::new())
///     .unwrap()
///     .field("age", &RuleType::of::<Number>(), params! { min_value: 0 })
///     .unwrap()
///     .on_violation(ViolationStrategy::CollectAll)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["name", "age"]);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    options: SchemaOptions,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            options: SchemaOptions::default(),
        }
    }

    /// Declare a field bound to `rule`, configured with `params`.
    /// Returns an error if configuration fails.
    pub fn field(
        mut self,
        name: impl Into<String>,
        rule: &RuleType,
        params: Params,
    ) -> Result<Self, ConfigurationError> {
        let descriptor = FieldDescriptor::new(name, rule, params)?;
        self.fields.push(descriptor);
        Ok(self)
    }

    /// Declare a field from an already configured descriptor.
    pub fn add_field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.options.unknown_fields = policy;
        self
    }

    pub fn on_violation(mut self, strategy: ViolationStrategy) -> Self {
        self.options.on_violation = strategy;
        self
    }

    pub fn options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the schema.
    /// Returns an error if a field name repeats or a descriptor is only
    /// partly configured.
    pub fn build(self) -> Result<Arc<Schema>, ConfigurationError> {
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index]
                .iter()
                .any(|earlier| earlier.name() == field.name())
            {
                return Err(ConfigurationError::new(format!(
                    "Field `{}` is declared more than once in `{}`",
                    field.name(),
                    self.name
                )));
            }
            if !field.is_configured() {
                return Err(ConfigurationError::new(format!(
                    "Field `{}` of `{}` is not fully configured",
                    field.name(),
                    self.name
                )));
            }
        }

        tracing::debug!(
            schema = %self.name,
            fields = self.fields.len(),
            "schema defined"
        );
        Ok(Arc::new(Schema {
            name: self.name,
            fields: self.fields,
            options: self.options,
        }))
    }
}
