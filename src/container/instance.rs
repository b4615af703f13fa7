//! Container instances: validated field values of one schema.

use super::options::{UnknownFields, ViolationStrategy};
use super::schema::Schema;
use crate::core::{Mapping, ValidationError, Value};
use crate::descriptor::{InvocationCache, Rejection};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// An instance of a container type.
///
/// Holds the stored (pre-mutate) value of every field. Stored values always
/// satisfy their field's rule chain: construction and [`Instance::set`] either
/// validate successfully or leave the instance untouched.
#[derive(Clone)]
pub struct Instance {
    schema: Arc<Schema>,
    values: Mapping,
}

impl Instance {
    /// Instance with no values, used as the starting point of construction.
    pub(crate) fn empty(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            values: Mapping::new(),
        }
    }

    /// Construct an instance from a mapping of field name to raw value.
    ///
    /// Fields are validated in declaration order, so rules can read fields
    /// declared earlier. Derived fields are computed; a value supplied for
    /// one is ignored.
    pub fn new(schema: &Arc<Schema>, mut mapping: Mapping) -> Result<Self, ValidationError> {
        let options = *schema.options();
        let mut failures = ValidationError::new(Vec::new());

        let unknown: Vec<String> = mapping
            .keys()
            .filter(|key| schema.field(key).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            match options.unknown_fields {
                UnknownFields::Reject => {
                    let errors = unknown
                        .iter()
                        .map(|key| format!("`{}` has no field `{key}`", schema.name()))
                        .collect();
                    failures.extend(ValidationError::new(errors));
                    if options.on_violation == ViolationStrategy::FirstFailingField {
                        return Err(failures);
                    }
                }
                UnknownFields::Ignore => {
                    tracing::warn!(schema = %schema.name(), keys = ?unknown, "ignoring unknown fields");
                }
            }
        }

        let mut instance = Self::empty(Arc::clone(schema));
        for field in schema.fields() {
            let supplied = mapping.remove(field.name());
            let input = if field.is_derived() {
                Value::Null
            } else {
                match supplied {
                    Some(value) => value,
                    None => {
                        let missing =
                            ValidationError::single(format!("Missing value for field `{}`", field.name()));
                        match options.on_violation {
                            ViolationStrategy::FirstFailingField => return Err(missing),
                            ViolationStrategy::CollectAll => {
                                failures.extend(missing);
                                continue;
                            }
                        }
                    }
                }
            };

            let mut cache = InvocationCache::new();
            match field.run_validate(&instance, input, &mut cache) {
                Ok(value) => {
                    instance.values.insert(field.name().to_string(), value);
                }
                Err(Rejection::Halted(error)) => {
                    failures.extend(error);
                    return Err(failures);
                }
                Err(Rejection::Invalid(error)) => match options.on_violation {
                    ViolationStrategy::FirstFailingField => return Err(error),
                    ViolationStrategy::CollectAll => failures.extend(error),
                },
            }
        }

        if !failures.is_empty() {
            tracing::debug!(schema = %schema.name(), errors = failures.len(), "construction failed");
            return Err(failures);
        }
        Ok(instance)
    }

    /// Construct from `(field, value)` pairs.
    pub fn from_values<K, I>(schema: &Arc<Schema>, values: I) -> Result<Self, ValidationError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mapping = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self::new(schema, mapping)
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Read a field: the stored value passed through the field's mutate
    /// phase. Recomputed on every call.
    pub fn get(&self, name: &str) -> Option<Value> {
        let field = self.schema.field(name)?;
        let stored = self.values.get(name)?;
        Some(field.mutate(self, stored))
    }

    /// The stored value, without mutation.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stored values of every assigned field, in declaration order.
    pub fn values(&self) -> &Mapping {
        &self.values
    }

    /// Read every field through its mutate phase.
    pub fn view(&self) -> Mapping {
        self.schema
            .fields()
            .iter()
            .filter_map(|field| {
                let stored = self.values.get(field.name())?;
                Some((field.name().to_string(), field.mutate(self, stored)))
            })
            .collect()
    }

    /// Assign a field. The value is validated against the field's rule
    /// chain; on failure the stored value is left unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ValidationError> {
        let schema = Arc::clone(&self.schema);
        let Some(field) = schema.field(name) else {
            return Err(ValidationError::single(format!(
                "`{}` has no field `{name}`",
                schema.name()
            )));
        };

        let value = field.validate(self, value.into())?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn into_mapping(self) -> Mapping {
        self.values
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .values
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.schema.name(), fields)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("schema", &self.schema.name())
            .field("values", &self.values)
            .finish()
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
