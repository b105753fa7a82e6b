//! Field-by-field block codec
//!
//! Records never write their in-memory representation. Each field is
//! appended to (or taken from) the block in declaration order:
//!
//! - integers and floats use their fixed-width native-endian bytes
//! - text uses a fixed-capacity, NUL-padded buffer
//!
//! A text buffer of capacity `N` holds at most `N - 1` bytes of text, so at
//! least one terminator byte is always present on disk.

use super::errors::{CodecError, CodecResult};

/// Capacity in bytes of the text label carried by the bundled record types.
pub const TEXT_CAPACITY: usize = 50;

/// Returns the longest prefix of `text` that fits in `usable` bytes.
///
/// Stops at the first NUL and never splits a UTF-8 sequence, so the
/// stored prefix always decodes back to valid text.
pub fn truncate_text(text: &str, usable: usize) -> &str {
    let text = match text.find('\0') {
        Some(nul) => &text[..nul],
        None => text,
    };
    if text.len() <= usable {
        return text;
    }
    let mut end = usable;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Appends fields to an encoded block.
pub struct BlockWriter {
    buf: Vec<u8>,
}

impl BlockWriter {
    /// Creates a writer for a block of `len` bytes
    pub fn with_len(len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(len),
        }
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_ne_bytes());
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_ne_bytes());
    }

    /// Appends `text` as a `capacity`-byte field, truncating silently.
    pub fn put_text(&mut self, text: &str, capacity: usize) {
        let stored = truncate_text(text, capacity.saturating_sub(1));
        self.buf.extend_from_slice(stored.as_bytes());
        self.buf
            .resize(self.buf.len() + (capacity - stored.len()), 0);
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Takes fields from an encoded block in order.
pub struct BlockReader<'a> {
    block: &'a [u8],
    pos: usize,
}

impl<'a> BlockReader<'a> {
    /// Creates a reader over `block`, rejecting it unless it is exactly
    /// `expected` bytes long.
    pub fn new(block: &'a [u8], expected: usize) -> CodecResult<Self> {
        if block.len() != expected {
            return Err(CodecError::WrongLength {
                expected,
                actual: block.len(),
            });
        }
        Ok(Self { block, pos: 0 })
    }

    fn take<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self
            .block
            .get(self.pos..self.pos + N)
            .ok_or(CodecError::WrongLength {
                expected: self.pos + N,
                actual: self.block.len(),
            })?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn get_i32(&mut self) -> CodecResult<i32> {
        self.take::<4>().map(i32::from_ne_bytes)
    }

    pub fn get_f32(&mut self) -> CodecResult<f32> {
        self.take::<4>().map(f32::from_ne_bytes)
    }

    /// Reads a `capacity`-byte text field up to its first NUL.
    pub fn get_text(&mut self, capacity: usize) -> CodecResult<String> {
        let start = self.pos;
        let field = self
            .block
            .get(start..start + capacity)
            .ok_or(CodecError::WrongLength {
                expected: start + capacity,
                actual: self.block.len(),
            })?;
        self.pos += capacity;

        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        std::str::from_utf8(&field[..end])
            .map(str::to_owned)
            .map_err(|e| CodecError::InvalidText(start + e.valid_up_to()))
    }
}
