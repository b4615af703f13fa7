//! Text format adapters.

use super::error::SerializationError;
use crate::core::{Mapping, Value, ValueKind};
use std::fmt;
use std::sync::Arc;

/// Converts between text and a field mapping.
pub trait TextFormat {
    fn load(&self, text: &str) -> Result<Mapping, SerializationError>;

    fn dump(&self, mapping: &Mapping) -> Result<String, SerializationError>;
}

/// JSON adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json {
    pub pretty: bool,
}

impl Json {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl TextFormat for Json {
    fn load(&self, text: &str) -> Result<Mapping, SerializationError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SerializationError::Parse(e.to_string()))?;
        into_mapping(value)
    }

    fn dump(&self, mapping: &Mapping) -> Result<String, SerializationError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(mapping)
        } else {
            serde_json::to_string(mapping)
        };
        rendered.map_err(|e| SerializationError::Render(e.to_string()))
    }
}

type LoadFn = Arc<dyn Fn(&str) -> Result<Value, String> + Send + Sync>;
type DumpFn = Arc<dyn Fn(&Mapping) -> Result<String, String> + Send + Sync>;

/// Adapter over caller-supplied load and dump functions, for formats this
/// crate does not ship (YAML, TOML, ...).
///
/// # Example
///
/// ```rust
/// use fieldrule::serialization::{FnFormat, TextFormat};
/// use serde_json::{json, Value};
///
/// let lines = FnFormat::new(
///     |text| {
///         let mut map = serde_json::Map::new();
///         for line in text.lines() {
///             let (key, value) = line.split_once('=').ok_or("missing `=`")?;
///             map.insert(key.to_string(), Value::from(value));
///         }
///         Ok(Value::Object(map))
///     },
///     |mapping| {
///         Ok(mapping
///             .iter()
///             .map(|(key, value)| format!("{key}={}", value.as_str().unwrap_or_default()))
///             .collect::<Vec<_>>()
///             .join("\n"))
///     },
/// );
///
/// let mapping = lines.load("name=ab").unwrap();
/// assert_eq!(mapping.get("name"), Some(&json!("ab")));
/// assert_eq!(lines.dump(&mapping).unwrap(), "name=ab");
/// ```
#[derive(Clone)]
pub struct FnFormat {
    load: LoadFn,
    dump: DumpFn,
}

impl FnFormat {
    pub fn new<L, D>(load: L, dump: D) -> Self
    where
        L: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
        D: Fn(&Mapping) -> Result<String, String> + Send + Sync + 'static,
    {
        Self {
            load: Arc::new(load),
            dump: Arc::new(dump),
        }
    }
}

impl TextFormat for FnFormat {
    fn load(&self, text: &str) -> Result<Mapping, SerializationError> {
        let value = (self.load)(text).map_err(SerializationError::Parse)?;
        into_mapping(value)
    }

    fn dump(&self, mapping: &Mapping) -> Result<String, SerializationError> {
        (self.dump)(mapping).map_err(SerializationError::Render)
    }
}

impl fmt::Debug for FnFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFormat(..)")
    }
}

fn into_mapping(value: Value) -> Result<Mapping, SerializationError> {
    match value {
        Value::Object(mapping) => Ok(mapping),
        other => Err(SerializationError::NotAMapping {
            found: ValueKind::of(&other).to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_loads_mappings_in_key_order() {
        let mapping = Json::default().load(r#"{"name": "ab", "age": 3}"#).unwrap();

        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(mapping.get("age"), Some(&json!(3)));
    }

    #[test]
    fn json_rejects_non_mappings() {
        let error = Json::default().load("[1, 2]").unwrap_err();
        assert_eq!(error.to_string(), "Expected a mapping at the top level, found array");

        assert!(matches!(
            Json::default().load("{"),
            Err(SerializationError::Parse(_))
        ));
    }

    #[test]
    fn json_dump_honours_pretty_flag() {
        let mut mapping = Mapping::new();
        mapping.insert("name".to_string(), json!("ab"));

        assert_eq!(Json::compact().dump(&mapping).unwrap(), r#"{"name":"ab"}"#);
        assert_eq!(Json::pretty().dump(&mapping).unwrap(), "{\n  \"name\": \"ab\"\n}");
    }

    #[test]
    fn fn_format_surfaces_caller_errors() {
        let broken = FnFormat::new(|_| Err("nope".to_string()), |_| Err("no output".to_string()));

        assert_eq!(broken.load("x").unwrap_err().to_string(), "Parsing failed: nope");
        assert_eq!(
            broken.dump(&Mapping::new()).unwrap_err().to_string(),
            "Rendering failed: no output"
        );
    }
}
