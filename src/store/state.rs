//! Store lifecycle state
//!
//! ```text
//! Closed -> (create/open) -> Open -> (close) -> Closed -> (reopen_append) -> Open
//! ```
//!
//! The file handle only exists inside the `Open` state, so a closed store
//! cannot touch the file and leaving `Open` always releases the handle.

use std::fmt;
use std::fs::{File, OpenOptions};

/// How the file was opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create the file, discarding any existing content
    CreateOrReplace,
    /// Open an existing file without truncation
    Existing,
    /// Create if missing, keep content, write cursor at end of file
    Append,
}

impl OpenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenMode::CreateOrReplace => "create_or_replace",
            OpenMode::Existing => "existing",
            OpenMode::Append => "append",
        }
    }

    /// Read-write options for this mode. Writes are positional, so the OS
    /// append flag is never set.
    pub(crate) fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        match self {
            OpenMode::CreateOrReplace => {
                options.create(true).truncate(true);
            }
            OpenMode::Existing => {}
            OpenMode::Append => {
                options.create(true);
            }
        }
        options
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observable lifecycle state of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Open(OpenMode),
    Closed,
}

impl StoreState {
    pub fn is_open(&self) -> bool {
        matches!(self, StoreState::Open(_))
    }
}

/// Owned file resource, present only while open
#[derive(Debug)]
pub(crate) enum Handle {
    Open { file: File, mode: OpenMode },
    Closed,
}

impl Handle {
    pub(crate) fn state(&self) -> StoreState {
        match self {
            Handle::Open { mode, .. } => StoreState::Open(*mode),
            Handle::Closed => StoreState::Closed,
        }
    }
}
