//! Observability for the record store
//!
//! Structured, synchronous JSON logging. Observability is read-only: a
//! failed log write never changes the outcome of a store operation.

mod logger;

pub use logger::{Logger, Severity};
