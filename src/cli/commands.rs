//! CLI command implementations
//!
//! Each command opens its own store, performs one operation and releases
//! the file before returning. The first store error ends the command.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};

use crate::observability::Logger;
use crate::record::{Employee, FixedRecord, Student};
use crate::store::{OpenMode, RecordStore};

use super::args::{Cli, Command};
use super::config::{Config, RecordKind};
use super::errors::CliResult;
use super::io::{read_stdin_records, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Demo { path } => demo(&path),
        Command::Append { config } => append(&config),
        Command::Dump { config } => dump(&config),
        Command::Get { config, index } => get(&config, index),
        Command::Inspect { config } => inspect(&config),
    }
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    Logger::set_min_severity(config.log_severity());
    Ok(config)
}

/// Writes three employees, resets both cursors and reads them back.
pub fn demo(path: &Path) -> CliResult<()> {
    let records = demo_roundtrip(path)?;
    write_response(json!({ "path": path.display().to_string(), "records": records }))
}

/// The demo scenario without output; returns the records read back.
pub fn demo_roundtrip(path: &Path) -> CliResult<Vec<Employee>> {
    let written = [
        Employee::new(1, 100.0, "Ibrahim"),
        Employee::new(2, 100.0, "Maybe"),
        Employee::new(3, 100.0, "Again"),
    ];

    let mut store = RecordStore::<Employee>::create_or_replace(path)?;
    for employee in &written {
        store.write_record(employee)?;
    }
    store.reset_read_cursor()?;
    store.reset_write_cursor()?;

    let mut read = Vec::with_capacity(written.len());
    for _ in 0..written.len() {
        read.push(store.read_record()?);
    }
    store.close()?;
    Ok(read)
}

/// Appends JSON records from stdin to the configured file.
pub fn append(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data = match config.record_kind {
        RecordKind::Employee => append_records::<Employee>(&config, read_stdin_records()?)?,
        RecordKind::Student => append_records::<Student>(&config, read_stdin_records()?)?,
    };
    write_response(data)
}

/// Appends `records` at the end of the configured file, creating it if
/// missing.
pub fn append_records<R: FixedRecord>(config: &Config, records: Vec<R>) -> CliResult<Value> {
    let mut store =
        RecordStore::<R>::open_with(&config.data_file, OpenMode::Append, config.store_options())?;
    let first_index = store.write_cursor() / R::ENCODED_LEN as u64;
    for record in &records {
        store.write_record(record)?;
    }
    let record_count = store.record_count()?;
    store.close()?;

    Ok(json!({
        "appended": records.len(),
        "first_index": first_index,
        "record_count": record_count,
    }))
}

/// Prints every record in the configured file.
pub fn dump(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    match config.record_kind {
        RecordKind::Employee => write_indexed(read_records::<Employee>(&config)?),
        RecordKind::Student => write_indexed(read_records::<Student>(&config)?),
    }
}

fn write_indexed<R: Serialize>(records: Vec<R>) -> CliResult<()> {
    for (index, record) in records.iter().enumerate() {
        write_response(json!({ "index": index, "record": record }))?;
    }
    Ok(())
}

/// Reads all complete records of the configured file.
pub fn read_records<R: FixedRecord>(config: &Config) -> CliResult<Vec<R>> {
    let mut store = RecordStore::<R>::open_existing(&config.data_file)?;
    let records = store.read_all()?;
    store.close()?;
    Ok(records)
}

/// Prints the record at `index`.
pub fn get(config_path: &Path, index: u64) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data = match config.record_kind {
        RecordKind::Employee => get_record::<Employee>(&config, index)?,
        RecordKind::Student => get_record::<Student>(&config, index)?,
    };
    write_response(data)
}

pub fn get_record<R: FixedRecord + Serialize>(config: &Config, index: u64) -> CliResult<Value> {
    let mut store = RecordStore::<R>::open_existing(&config.data_file)?;
    let record = store.read_at(index)?;
    store.close()?;
    Ok(json!({ "index": index, "record": record }))
}

/// Prints layout and integrity facts about the configured file.
pub fn inspect(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let data = match config.record_kind {
        RecordKind::Employee => inspect_file::<Employee>(&config)?,
        RecordKind::Student => inspect_file::<Student>(&config)?,
    };
    write_response(data)
}

pub fn inspect_file<R: FixedRecord>(config: &Config) -> CliResult<Value> {
    let mut store = RecordStore::<R>::open_existing(&config.data_file)?;
    let record_count = store.record_count()?;
    let trailing_bytes = store.trailing_bytes()?;
    let checksum = store.content_checksum()?;
    store.close()?;

    if trailing_bytes != 0 {
        Logger::warn(
            "STORE_TORN_TAIL",
            &[
                ("path", config.data_file.display().to_string().as_str()),
                ("trailing_bytes", trailing_bytes.to_string().as_str()),
            ],
        );
    }

    Ok(json!({
        "kind": R::KIND,
        "layout_version": R::LAYOUT_VERSION,
        "stride": R::ENCODED_LEN,
        "record_count": record_count,
        "trailing_bytes": trailing_bytes,
        "crc32": format!("{:08x}", checksum),
    }))
}
