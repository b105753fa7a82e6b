//! Record store error types
//!
//! Error codes:
//! - RECSTORE_INVALID_STATE (ERROR severity)
//! - RECSTORE_IO_ERROR (ERROR severity)
//! - RECSTORE_END_OF_DATA (INFO severity) - exhaustion, not failure
//! - RECSTORE_CORRUPT_RECORD (ERROR severity)

use std::fmt;
use std::io;

use crate::record::CodecError;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Normal termination of a scan
    Info,
    /// Operation fails, caller decides what to do next
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Store error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Operation invoked in the wrong lifecycle state
    StateError,
    /// Open, seek, read or write on the file failed
    IoError,
    /// Fewer than one full block remains at the read cursor
    EndOfData,
    /// A full block was read but could not be decoded
    CorruptRecord,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::StateError => "RECSTORE_INVALID_STATE",
            StoreErrorCode::IoError => "RECSTORE_IO_ERROR",
            StoreErrorCode::EndOfData => "RECSTORE_END_OF_DATA",
            StoreErrorCode::CorruptRecord => "RECSTORE_CORRUPT_RECORD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreErrorCode::EndOfData => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with code, message and optional context
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Operation not allowed in the current lifecycle state
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::StateError, message)
    }

    /// Store is closed but the operation needs an open file
    pub fn not_open(operation: &str) -> Self {
        Self::invalid_state(format!("File not open: cannot {}", operation))
    }

    /// Underlying I/O failure
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StoreErrorCode::IoError, message)
        }
    }

    /// Short write: the block was not fully transferred
    pub fn incomplete_write(offset: u64, written: usize, expected: usize) -> Self {
        Self::new(
            StoreErrorCode::IoError,
            format!("Incomplete write: {} of {} bytes", written, expected),
        )
        .at_offset(offset)
    }

    /// Fewer than `stride` bytes remain at `offset`
    pub fn end_of_data(offset: u64, remaining: u64, stride: usize) -> Self {
        Self::new(
            StoreErrorCode::EndOfData,
            format!(
                "End of data: {} bytes remaining, record size is {}",
                remaining, stride
            ),
        )
        .at_offset(offset)
    }

    /// Block at `offset` could not be decoded
    pub fn corrupt_record(offset: u64, cause: CodecError) -> Self {
        Self::new(StoreErrorCode::CorruptRecord, cause.to_string()).at_offset(offset)
    }

    fn at_offset(mut self, offset: u64) -> Self {
        self.details = Some(format!("byte_offset: {}", offset));
        self
    }

    /// Returns the error code
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> ErrorSeverity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn is_state_error(&self) -> bool {
        self.code == StoreErrorCode::StateError
    }

    pub fn is_io_error(&self) -> bool {
        self.code == StoreErrorCode::IoError
    }

    /// True when a read ran out of data rather than failing
    pub fn is_end_of_data(&self) -> bool {
        self.code == StoreErrorCode::EndOfData
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreErrorCode::StateError.code(), "RECSTORE_INVALID_STATE");
        assert_eq!(StoreErrorCode::IoError.code(), "RECSTORE_IO_ERROR");
        assert_eq!(StoreErrorCode::EndOfData.code(), "RECSTORE_END_OF_DATA");
        assert_eq!(StoreErrorCode::CorruptRecord.code(), "RECSTORE_CORRUPT_RECORD");
    }

    #[test]
    fn test_end_of_data_is_not_a_failure() {
        let err = StoreError::end_of_data(116, 0, 58);
        assert!(err.is_end_of_data());
        assert_eq!(err.severity(), ErrorSeverity::Info);
        assert!(!err.is_io_error());
    }

    #[test]
    fn test_severity_names_match_log_levels() {
        use crate::observability::Severity;

        assert_eq!(ErrorSeverity::Info.to_string(), Severity::Info.as_str());
        assert_eq!(ErrorSeverity::Error.to_string(), Severity::Error.as_str());
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = StoreError::io_error(
            "open failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.is_io_error());
        assert_eq!(err.source().unwrap().to_string(), "denied");
    }

    #[test]
    fn test_display_contains_code_and_offset() {
        let err = StoreError::corrupt_record(58, CodecError::InvalidText(10));
        let display = err.to_string();
        assert!(display.contains("RECSTORE_CORRUPT_RECORD"));
        assert!(display.contains("ERROR"));
        assert!(display.contains("byte_offset: 58"));
    }

    #[test]
    fn test_not_open_is_state_error() {
        let err = StoreError::not_open("write record");
        assert!(err.is_state_error());
        assert!(err.message().contains("File not open"));
    }
}
