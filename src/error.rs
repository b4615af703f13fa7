//! Crate-level error joining the boundary errors.

use crate::composition::CompositionError;
use crate::core::{ConfigurationError, ValidationError};
use crate::serialization::SerializationError;
use thiserror::Error;

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl Error {
    /// The validation messages, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(error) => Some(&error.errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_errors_convert_transparently() {
        let error: Error = ValidationError::single("Attribute `age` should be >= 0").into();
        assert_eq!(error.to_string(), "Attribute `age` should be >= 0");
        assert_eq!(
            error.validation_errors(),
            Some(&["Attribute `age` should be >= 0".to_string()][..])
        );

        let error: Error = ConfigurationError::new("bad").into();
        assert_eq!(error.to_string(), "Configuration failed: bad");
        assert!(error.validation_errors().is_none());
    }

    #[test]
    fn question_mark_lifts_composition_errors() {
        fn build() -> Result<(), Error> {
            Err(CompositionError::new("cycle"))?
        }

        assert!(matches!(build(), Err(Error::Composition(_))));
    }
}
