//! JSON I/O handling for the CLI
//!
//! - Input: one JSON record per stdin line
//! - Output: one JSON object per stdout line

use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Parses one JSON record per non-empty line of `input`.
pub fn read_records<T: DeserializeOwned, B: BufRead>(input: B) -> CliResult<Vec<T>> {
    let mut records = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            CliError::invalid_input(format!("line {}: {}", number + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Reads records from stdin
pub fn read_stdin_records<T: DeserializeOwned>() -> CliResult<Vec<T>> {
    let stdin = io::stdin();
    read_records(stdin.lock())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
