//! Fixed-layout record types
//!
//! Every record type encodes to a block of exactly `ENCODED_LEN` bytes. The
//! block layout is an explicit field-by-field routine, versioned through
//! `LAYOUT_VERSION`; in-memory struct bytes are never written.
//!
//! ```text
//! Employee: | id (i32) | salary (f32) | name (50 bytes, NUL-padded) |
//! Student:  | id (i32) | name (50 bytes, NUL-padded) | marks (f32)  |
//! ```
//!
//! Text longer than 49 bytes is truncated silently on encode.

mod codec;
mod employee;
mod errors;
mod student;

pub use codec::{truncate_text, BlockReader, BlockWriter, TEXT_CAPACITY};
pub use employee::Employee;
pub use errors::{CodecError, CodecResult};
pub use student::Student;

/// A record with a constant encoded size.
///
/// The encoded size is the stride of any store holding this type.
pub trait FixedRecord: Sized {
    /// Size of one encoded block in bytes
    const ENCODED_LEN: usize;

    /// Revision of the field layout
    const LAYOUT_VERSION: u16;

    /// Short type name used in logs and CLI output
    const KIND: &'static str;

    /// Appends every field to `out` in layout order.
    fn write_fields(&self, out: &mut BlockWriter);

    /// Takes every field from `input` in layout order.
    fn read_fields(input: &mut BlockReader<'_>) -> CodecResult<Self>;

    /// Encodes the record into a block of `ENCODED_LEN` bytes.
    fn encode(&self) -> Vec<u8> {
        let mut out = BlockWriter::with_len(Self::ENCODED_LEN);
        self.write_fields(&mut out);
        debug_assert_eq!(out.len(), Self::ENCODED_LEN);
        out.finish()
    }

    /// Decodes a block produced by [`FixedRecord::encode`].
    ///
    /// Either every field is decoded or an error is returned.
    fn decode(block: &[u8]) -> CodecResult<Self> {
        let mut input = BlockReader::new(block, Self::ENCODED_LEN)?;
        Self::read_fields(&mut input)
    }
}
