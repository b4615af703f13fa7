//! Built-in rules.
//!
//! | Rule        | Parameters                               | Phase             |
//! |-------------|------------------------------------------|-------------------|
//! | `Sized`     | `min_size`, `max_size`                   | validate          |
//! | `Type`      | `types`                                  | validate          |
//! | `Text`      |                                          | validate          |
//! | `List`      |                                          | validate          |
//! | `Dict`      | `required_keys`                          | validate          |
//! | `Number`    | `min_value`, `max_value`                 | validate          |
//! | `Predicate` | `predicate`, `default`, `error_message`  | validate          |
//! | `LazyLoad`  | `factory`                                | validate, derived |
//! | `Format`    | `template`                               | mutate            |
//! | `Transform` | `transform`                              | mutate            |
//! | `DateTime`  | `format`                                 | validate, mutate  |
//! | `Uuid`      |                                          | validate          |
//!
//! Every rule implements `Default`, so it can be declared with
//! `RuleType::of::<R>()` and combined with any other rule.

mod formats;
mod lazy;
mod predicate;
mod sized;
mod transform;
mod types;

pub use formats::{DateTime, Uuid};
pub use lazy::LazyLoad;
pub use predicate::Predicate;
pub use sized::Sized;
pub use transform::{Format, Transform};
pub use types::{Dict, List, Number, Text, Type};
