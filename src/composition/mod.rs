//! Rule identity, linearization and combination.
//!
//! Combining rules declares local orders ("A before B"); the linearizer
//! merges every local order reachable from a combination into a single
//! duplicate-free chain. The chain is computed once, when the composite rule
//! type is built, and stored as an arena of leaf rules plus an index list.
//!
//! # Example
//!
//! ```rust
//! use fieldrule::composition::{combine, RuleType};
//! use fieldrule::rules::{Sized, Type};
//!
//! let sized = RuleType::of::<Sized>();
//! let ty = RuleType::of::<Type>();
//!
//! let name_rule = sized.and(&ty).unwrap();
//! assert_eq!(name_rule.chain_names(), vec!["Sized", "Type"]);
//!
//! // Contradictory combinations are rejected rather than silently reordered.
//! let reversed = combine([&ty, &sized]).unwrap();
//! assert!(combine([&name_rule, &reversed]).is_err());
//! ```

pub mod combinator;
pub mod error;
pub mod linearize;
pub mod rule_type;

pub use combinator::combine;
pub use error::CompositionError;
pub use linearize::{merge, Conflict};
pub use rule_type::{RuleFactory, RuleId, RuleNode, RuleType};
