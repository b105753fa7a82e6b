//! CLI module for recstore
//!
//! Provides command-line interface for:
//! - demo: write and read back the sample employees
//! - append: add records from stdin
//! - dump / get: print records
//! - inspect: layout and checksum report

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    append_records, demo_roundtrip, get_record, inspect_file, read_records, run, run_command,
};
pub use config::{Config, RecordKind};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
