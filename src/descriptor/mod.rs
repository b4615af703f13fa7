//! Field descriptors and per-call invocation bookkeeping.
//!
//! A `FieldDescriptor` binds a linearized rule chain to one field name and
//! drives the three rule phases:
//! - configure: once per distinct rule, at definition time
//! - validate: on every assignment, collecting every rejection
//! - mutate: on every read, threading transforms in chain order
//!
//! The `InvocationCache` records which rules already ran during one call and
//! is created fresh for every call unless the caller supplies one.

pub mod cache;
pub mod field;

pub use cache::InvocationCache;
pub use field::FieldDescriptor;
pub(crate) use field::Rejection;
