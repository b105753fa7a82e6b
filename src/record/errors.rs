//! Record codec errors

use thiserror::Error;

/// Result type for record encoding and decoding
pub type CodecResult<T> = Result<T, CodecError>;

/// Failures while mapping a record to or from its fixed-size block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Wrong block length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Invalid UTF-8 in text field at byte {0}")]
    InvalidText(usize),
}
