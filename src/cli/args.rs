//! CLI argument definitions using clap
//!
//! Commands:
//! - recstore demo --path <file>
//! - recstore append --config <path>
//! - recstore dump --config <path>
//! - recstore get --config <path> --index <n>
//! - recstore inspect --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// recstore - fixed-width binary record files
#[derive(Parser, Debug)]
#[command(name = "recstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write three sample employees to a fresh file and read them back
    Demo {
        /// Record file to create (replaced if it exists)
        #[arg(long, default_value = "./employee.bin")]
        path: PathBuf,
    },

    /// Append records read as JSON lines from stdin
    Append {
        /// Path to configuration file
        #[arg(long, default_value = "./recstore.json")]
        config: PathBuf,
    },

    /// Print every record, one JSON line each
    Dump {
        /// Path to configuration file
        #[arg(long, default_value = "./recstore.json")]
        config: PathBuf,
    },

    /// Print the record at a given index
    Get {
        /// Path to configuration file
        #[arg(long, default_value = "./recstore.json")]
        config: PathBuf,

        /// Zero-based record index
        #[arg(long)]
        index: u64,
    },

    /// Print stride, record count and checksum of the record file
    Inspect {
        /// Path to configuration file
        #[arg(long, default_value = "./recstore.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["recstore", "get", "--index", "4"]).unwrap();
        match cli.command {
            Command::Get { config, index } => {
                assert_eq!(index, 4);
                assert_eq!(config, PathBuf::from("./recstore.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_get_requires_index() {
        assert!(Cli::try_parse_from(["recstore", "get"]).is_err());
    }

    #[test]
    fn test_demo_default_path() {
        let cli = Cli::try_parse_from(["recstore", "demo"]).unwrap();
        assert!(matches!(cli.command, Command::Demo { path } if path == PathBuf::from("./employee.bin")));
    }
}
