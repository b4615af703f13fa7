//! Loading and dumping container instances.
//!
//! Instances convert to and from plain field mappings. Text formats plug in
//! through the `TextFormat` trait; JSON ships with the crate and any other
//! format can be supplied as a pair of functions with `FnFormat`.
//!
//! Dumps carry the stored values of non-derived fields, so
//! `to_mapping(from_mapping(d)?) == d` for any valid mapping `d`. Derived
//! fields are left out and recomputed on load.

use crate::container::{Instance, Schema};
use crate::core::Mapping;
use crate::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub mod error;
pub mod format;

pub use error::SerializationError;
pub use format::{FnFormat, Json, TextFormat};

/// Build and validate an instance from a field mapping.
pub fn from_mapping(schema: &Arc<Schema>, mapping: &Mapping) -> Result<Instance, Error> {
    Ok(Instance::new(schema, mapping.clone())?)
}

/// The stored value of every non-derived field, in declaration order.
pub fn to_mapping(instance: &Instance) -> Mapping {
    instance
        .schema()
        .fields()
        .iter()
        .filter(|field| !field.is_derived())
        .filter_map(|field| {
            let value = instance.raw(field.name())?;
            Some((field.name().to_string(), value.clone()))
        })
        .collect()
}

pub fn from_text(
    schema: &Arc<Schema>,
    text: &str,
    format: &dyn TextFormat,
) -> Result<Instance, Error> {
    let mapping = format.load(text)?;
    from_mapping(schema, &mapping)
}

pub fn to_text(instance: &Instance, format: &dyn TextFormat) -> Result<String, Error> {
    Ok(format.dump(&to_mapping(instance))?)
}

pub fn load_file(
    schema: &Arc<Schema>,
    path: impl AsRef<Path>,
    format: &dyn TextFormat,
) -> Result<Instance, Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SerializationError::io(path, e))?;
    tracing::debug!(path = %path.display(), schema = %schema.name(), "loading instance");
    from_text(schema, &text, format)
}

/// Write an instance to `path`. The text goes to a sibling temp file first,
/// then replaces `path` in one rename.
pub fn dump_file(
    instance: &Instance,
    path: impl AsRef<Path>,
    format: &dyn TextFormat,
) -> Result<(), Error> {
    let path = path.as_ref();
    let text = to_text(instance, format)?;

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, text).map_err(|e| SerializationError::io(temp_path, e))?;
    if let Err(e) = fs::rename(temp_path, path) {
        if let Err(cleanup) = fs::remove_file(temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %cleanup, "could not remove temp file");
        }
        return Err(SerializationError::io(path, e).into());
    }
    tracing::debug!(path = %path.display(), schema = %instance.schema().name(), "dumped instance");
    Ok(())
}
