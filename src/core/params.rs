//! Named parameters consumed by rule configure hooks.

use super::error::ConfigurationError;
use super::value::{Value, ValueKind};
use crate::container::Instance;
use std::fmt;
use std::sync::Arc;

/// Predicate over the instance and the value being validated.
pub type PredicateFn = Arc<dyn Fn(&Instance, &Value) -> bool + Send + Sync>;

/// Computes a value from the instance.
pub type FactoryFn = Arc<dyn Fn(&Instance) -> Value + Send + Sync>;

/// Maps a value to a new one, with the instance available for context.
pub type TransformFn = Arc<dyn Fn(&Instance, &Value) -> Value + Send + Sync>;

/// A single configure parameter.
#[derive(Clone)]
pub enum Param {
    Value(Value),
    Predicate { label: String, check: PredicateFn },
    Factory(FactoryFn),
    Transform(TransformFn),
}

impl Param {
    fn shape(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Predicate { .. } => "predicate",
            Self::Factory(_) => "factory",
            Self::Transform(_) => "transform",
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Predicate { label, .. } => f.debug_tuple("Predicate").field(label).finish(),
            other => write!(f, "{}(..)", other.shape()),
        }
    }
}

/// Ordered bag of named parameters.
///
/// Each rule consumes only the names it declares with [`Params::take`];
/// everything else is left for the next rule in the chain.
#[derive(Clone, Debug, Default)]
pub struct Params {
    entries: Vec<(String, Param)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain value parameter, replacing any previous entry with that name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Param::Value(value.into()));
        self
    }

    /// Add a predicate parameter. `label` names the predicate in messages.
    pub fn with_predicate<F>(mut self, name: impl Into<String>, label: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Instance, &Value) -> bool + Send + Sync + 'static,
    {
        self.insert(
            name,
            Param::Predicate {
                label: label.into(),
                check: Arc::new(check),
            },
        );
        self
    }

    pub fn with_factory<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Instance) -> Value + Send + Sync + 'static,
    {
        self.insert(name, Param::Factory(Arc::new(factory)));
        self
    }

    pub fn with_transform<F>(mut self, name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&Instance, &Value) -> Value + Send + Sync + 'static,
    {
        self.insert(name, Param::Transform(Arc::new(transform)));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, param: Param) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = param,
            None => self.entries.push((name, param)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Param> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove and return every parameter whose name is in `names`.
    pub fn take(&mut self, names: &[&str]) -> Params {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(key, _)| names.contains(&key.as_str()));
        self.entries = kept;
        Params { entries: taken }
    }

    /// Move every entry of `other` into `self`.
    pub fn merge(&mut self, other: Params) {
        for (name, param) in other.entries {
            self.insert(name, param);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, param)| param)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain value parameter. An explicit `null` counts as absent.
    pub fn value(&self, name: &str) -> Result<Option<&Value>, ConfigurationError> {
        match self.get(name) {
            None | Some(Param::Value(Value::Null)) => Ok(None),
            Some(Param::Value(value)) => Ok(Some(value)),
            Some(_) => Err(ConfigurationError::invalid_parameter(name, "a plain value")),
        }
    }

    pub fn usize(&self, name: &str) -> Result<Option<usize>, ConfigurationError> {
        match self.value(name)? {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| ConfigurationError::invalid_parameter(name, "a non-negative integer")),
        }
    }

    pub fn f64(&self, name: &str) -> Result<Option<f64>, ConfigurationError> {
        match self.value(name)? {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| ConfigurationError::invalid_parameter(name, "a number")),
        }
    }

    pub fn string(&self, name: &str) -> Result<Option<String>, ConfigurationError> {
        match self.value(name)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ConfigurationError::invalid_parameter(name, "a string")),
        }
    }

    /// A single string or an array of strings.
    pub fn strings(&self, name: &str) -> Result<Option<Vec<String>>, ConfigurationError> {
        let invalid = || ConfigurationError::invalid_parameter(name, "a string or a list of strings");
        match self.value(name)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(_) => Err(invalid()),
        }
    }

    /// A single kind name or an array of kind names.
    pub fn kinds(&self, name: &str) -> Result<Option<Vec<ValueKind>>, ConfigurationError> {
        let Some(names) = self.strings(name)? else {
            return Ok(None);
        };
        names
            .iter()
            .map(|kind| {
                kind.parse::<ValueKind>()
                    .map_err(|reason| ConfigurationError::new(format!("Parameter `{name}`: {reason}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    pub fn predicate(&self, name: &str) -> Result<Option<(String, PredicateFn)>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Param::Predicate { label, check }) => Ok(Some((label.clone(), Arc::clone(check)))),
            Some(_) => Err(ConfigurationError::invalid_parameter(name, "a predicate")),
        }
    }

    pub fn factory(&self, name: &str) -> Result<Option<FactoryFn>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Param::Factory(factory)) => Ok(Some(Arc::clone(factory))),
            Some(_) => Err(ConfigurationError::invalid_parameter(name, "a factory")),
        }
    }

    pub fn transform(&self, name: &str) -> Result<Option<TransformFn>, ConfigurationError> {
        match self.get(name) {
            None => Ok(None),
            Some(Param::Transform(transform)) => Ok(Some(Arc::clone(transform))),
            Some(_) => Err(ConfigurationError::invalid_parameter(name, "a transform")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn take_removes_only_named_entries() {
        let mut params = Params::new()
            .with("min_size", 2)
            .with("types", json!(["string"]))
            .with("max_size", 5);

        let taken = params.take(&["min_size", "max_size"]);

        assert_eq!(taken.names().collect::<Vec<_>>(), vec!["min_size", "max_size"]);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["types"]);
    }

    #[test]
    fn with_replaces_existing_entry() {
        let params = Params::new().with("min_size", 2).with("min_size", 3);
        assert_eq!(params.len(), 1);
        assert_eq!(params.usize("min_size").unwrap(), Some(3));
    }

    #[test]
    fn null_counts_as_absent() {
        let params = Params::new().with("max_size", Value::Null);
        assert_eq!(params.usize("max_size").unwrap(), None);
    }

    #[test]
    fn typed_getters_reject_wrong_shapes() {
        let params = Params::new()
            .with("min_size", "two")
            .with("types", json!([1]))
            .with_factory("factory", |_| Value::Null);

        assert!(params.usize("min_size").is_err());
        assert!(params.strings("types").is_err());
        assert!(params.value("factory").is_err());
        assert!(params.predicate("factory").is_err());
        assert!(params.factory("factory").unwrap().is_some());
    }

    #[test]
    fn kinds_accept_single_name_or_list() {
        let params = Params::new()
            .with("one", "string")
            .with("many", json!(["integer", "number"]))
            .with("bad", "tuple");

        assert_eq!(params.kinds("one").unwrap(), Some(vec![ValueKind::String]));
        assert_eq!(
            params.kinds("many").unwrap(),
            Some(vec![ValueKind::Integer, ValueKind::Number])
        );
        assert!(params.kinds("bad").is_err());
        assert_eq!(params.kinds("absent").unwrap(), None);
    }

    #[test]
    fn merge_moves_entries() {
        let mut left = Params::new().with("a", 1);
        left.merge(Params::new().with("a", 2).with("b", 3));
        assert_eq!(left.usize("a").unwrap(), Some(2));
        assert!(left.contains("b"));
    }

    #[test]
    fn debug_hides_callables() {
        let params = Params::new().with_predicate("predicate", "is_adult", |_, _| true);
        let rendered = format!("{params:?}");
        assert!(rendered.contains("is_adult"));
    }
}
