//! CRC32 checksums over store content
//!
//! Blocks carry no checksum of their own; this digest covers a whole file
//! and is used to compare store contents.

use std::io::{self, Read};

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided data.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Computes a CRC32 checksum over everything `reader` yields.
pub fn checksum_reader<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut hasher = Hasher::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let data = b"fixed width records";
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn test_reader_matches_slice() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let streamed = checksum_reader(&mut io::Cursor::new(&data)).unwrap();
        assert_eq!(streamed, compute_checksum(&data));
    }

    #[test]
    fn test_checksum_detects_change() {
        let mut data = vec![1u8, 2, 3, 4];
        let original = compute_checksum(&data);
        data[1] ^= 0x01;
        assert_ne!(original, compute_checksum(&data));
    }
}
