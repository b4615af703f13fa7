//! Serialization error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or dumping container data.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Text could not be parsed by the format adapter
    #[error("Parsing failed: {0}")]
    Parse(String),

    /// The document parsed but its top level is not a mapping
    #[error("Expected a mapping at the top level, found {found}")]
    NotAMapping { found: String },

    /// The format adapter could not render the mapping
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Reading or writing a file failed
    #[error("I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SerializationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
