//! recstore - fixed-width binary record files
//!
//! Records encode to constant-size blocks, so record `i` of a file lives at
//! byte offset `i * stride` and can be read or rewritten without scanning.

pub mod cli;
pub mod observability;
pub mod record;
pub mod store;

pub use record::{Employee, FixedRecord, Student};
pub use store::{RecordStore, StoreError, StoreErrorCode, StoreResult};
