//! Length bounds.

use crate::core::{length_of, ConfigurationError, Context, Outcome, Params, Rule, RuleError, Value};

/// Checks that a value's length lies within `min_size..=max_size`.
///
/// Strings are measured in characters. Values without a length pass; pair
/// with [`Type`](super::Type) to require a sized kind.
#[derive(Debug, Clone, Default)]
pub struct Sized {
    min_size: Option<usize>,
    max_size: Option<usize>,
}

impl Rule for Sized {
    fn name(&self) -> &str {
        "Sized"
    }

    fn parameters(&self) -> &'static [&'static str] {
        &["min_size", "max_size"]
    }

    fn configure(&mut self, params: Params) -> Result<(), ConfigurationError> {
        self.min_size = params.usize("min_size")?;
        self.max_size = params.usize("max_size")?;
        Ok(())
    }

    fn validate(&self, ctx: &Context<'_>, value: &Value) -> Result<Outcome, RuleError> {
        let Some(length) = length_of(value) else {
            return Ok(Outcome::Keep);
        };
        match (self.min_size, self.max_size) {
            (Some(min), _) if length < min => Err(RuleError::invalid(format!(
                "Attribute `{}` length should be >= {min}",
                ctx.field()
            ))),
            (_, Some(max)) if length > max => Err(RuleError::invalid(format!(
                "Attribute `{}` length should be <= {max}",
                ctx.field()
            ))),
            _ => Ok(Outcome::Keep),
        }
    }
}
