//! Fixed-width record store
//!
//! A store owns one file and reads or writes whole records at explicit
//! cursor positions.
//!
//! # Design Principles
//!
//! - Constant stride: record `i` lives at `i * R::ENCODED_LEN`
//! - No header, no magic, no persisted record count
//! - Explicit lifecycle state; record operations on a closed store fail
//! - A read yields a fully decoded record or an error, never a partial one
//! - Errors surface immediately and are never retried

mod checksum;
mod errors;
mod record_store;
mod state;

pub use checksum::{checksum_reader, compute_checksum};
pub use errors::{ErrorSeverity, StoreError, StoreErrorCode, StoreResult};
pub use record_store::{RecordStore, StoreOptions};
pub use state::{OpenMode, StoreState};
