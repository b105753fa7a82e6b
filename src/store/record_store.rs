//! Fixed-stride record store
//!
//! The file is a flat sequence of `R::ENCODED_LEN`-byte blocks with no
//! header and no record count. Record `i` lives at `i * stride`.
//!
//! The store keeps independent read and write cursors. Every operation
//! seeks the handle to the relevant cursor first, so interleaving reads and
//! writes never disturbs the other cursor.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use super::checksum::checksum_reader;
use super::errors::{StoreError, StoreResult};
use super::state::{Handle, OpenMode, StoreState};
use crate::observability::Logger;
use crate::record::FixedRecord;

/// Tunables for a [`RecordStore`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// fsync after every record write
    pub sync_on_write: bool,
}

/// Random-access store of fixed-size records of type `R`.
#[derive(Debug)]
pub struct RecordStore<R: FixedRecord> {
    path: PathBuf,
    handle: Handle,
    read_cursor: u64,
    write_cursor: u64,
    at_end: bool,
    options: StoreOptions,
    _record: PhantomData<fn() -> R>,
}

fn open_file<'a>(handle: &'a mut Handle, operation: &str) -> StoreResult<&'a mut File> {
    match handle {
        Handle::Open { file, .. } => Ok(file),
        Handle::Closed => Err(StoreError::not_open(operation)),
    }
}

fn file_len(file: &File) -> StoreResult<u64> {
    file.metadata()
        .map(|m| m.len())
        .map_err(|e| StoreError::io_error("Failed to read file metadata", e))
}

fn seek_to(file: &mut File, offset: u64) -> StoreResult<()> {
    file.seek(SeekFrom::Start(offset))
        .map(|_| ())
        .map_err(|e| StoreError::io_error(format!("Failed to seek to offset {}", offset), e))
}

impl<R: FixedRecord> RecordStore<R> {
    /// Creates (or truncates) the file at `path` and opens it read-write.
    ///
    /// # Errors
    ///
    /// Returns `RECSTORE_IO_ERROR` if the file cannot be created.
    pub fn create_or_replace(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, OpenMode::CreateOrReplace, StoreOptions::default())
    }

    /// Opens an existing file read-write without truncation. Both cursors
    /// start at offset 0.
    pub fn open_existing(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, OpenMode::Existing, StoreOptions::default())
    }

    /// Opens `path` in the given mode with explicit options.
    pub fn open_with(
        path: impl AsRef<Path>,
        mode: OpenMode,
        options: StoreOptions,
    ) -> StoreResult<Self> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            handle: Handle::Closed,
            read_cursor: 0,
            write_cursor: 0,
            at_end: false,
            options,
            _record: PhantomData,
        };
        store.acquire(mode)?;
        Ok(store)
    }

    fn acquire(&mut self, mode: OpenMode) -> StoreResult<()> {
        let file = mode.open_options().open(&self.path).map_err(|e| {
            StoreError::io_error(
                format!("Failed to open record file: {}", self.path.display()),
                e,
            )
        })?;

        let end = file_len(&file)?;
        self.read_cursor = 0;
        self.write_cursor = match mode {
            OpenMode::Append => end,
            _ => 0,
        };
        self.at_end = false;
        self.handle = Handle::Open { file, mode };

        Logger::info(
            "STORE_OPENED",
            &[
                ("path", self.path.display().to_string().as_str()),
                ("mode", mode.as_str()),
                ("kind", R::KIND),
                ("stride", R::ENCODED_LEN.to_string().as_str()),
                ("file_len", end.to_string().as_str()),
            ],
        );
        Ok(())
    }

    /// Releases the file handle.
    ///
    /// # Errors
    ///
    /// Returns `RECSTORE_INVALID_STATE` if the store is already closed.
    pub fn close(&mut self) -> StoreResult<()> {
        match std::mem::replace(&mut self.handle, Handle::Closed) {
            Handle::Open { file, .. } => {
                if self.options.sync_on_write {
                    file.sync_all()
                        .map_err(|e| StoreError::io_error("fsync failed on close", e))?;
                }
                drop(file);
                let path = self.path.display().to_string();
                Logger::info("STORE_CLOSED", &[("path", path.as_str())]);
                Ok(())
            }
            Handle::Closed => Err(StoreError::invalid_state("File already closed")),
        }
    }

    /// Reopens a closed store without truncation. The write cursor is placed
    /// at end of file, the read cursor at offset 0.
    ///
    /// # Errors
    ///
    /// Returns `RECSTORE_INVALID_STATE` if the store is already open and
    /// `RECSTORE_IO_ERROR` if the file cannot be opened.
    pub fn reopen_append(&mut self) -> StoreResult<()> {
        if self.is_open() {
            return Err(StoreError::invalid_state("File already open"));
        }
        self.acquire(OpenMode::Append)
    }

    /// Moves the read cursor to offset 0 and clears the end-of-data flag.
    pub fn reset_read_cursor(&mut self) -> StoreResult<()> {
        open_file(&mut self.handle, "reset read cursor")?;
        self.read_cursor = 0;
        self.at_end = false;
        Ok(())
    }

    /// Moves the write cursor to offset 0 and clears the end-of-data flag.
    pub fn reset_write_cursor(&mut self) -> StoreResult<()> {
        open_file(&mut self.handle, "reset write cursor")?;
        self.write_cursor = 0;
        self.at_end = false;
        Ok(())
    }

    /// Encodes `record` and writes it at the write cursor, advancing the
    /// cursor by one stride.
    ///
    /// # Errors
    ///
    /// - `RECSTORE_INVALID_STATE` if the store is closed
    /// - `RECSTORE_IO_ERROR` if the block is not fully written
    pub fn write_record(&mut self, record: &R) -> StoreResult<()> {
        let offset = self.write_cursor;
        let sync = self.options.sync_on_write;
        let file = open_file(&mut self.handle, "write record")?;
        let block = record.encode();

        seek_to(file, offset)?;
        if let Err(e) = write_block(file, &block, offset) {
            Logger::error(
                "STORE_WRITE_FAILED",
                &[
                    ("path", self.path.display().to_string().as_str()),
                    ("offset", offset.to_string().as_str()),
                ],
            );
            return Err(e);
        }

        if sync {
            file.sync_all().map_err(|e| {
                StoreError::io_error(format!("fsync failed after write at offset {}", offset), e)
            })?;
        }

        self.write_cursor = offset + block.len() as u64;
        Ok(())
    }

    /// Reads and decodes one block at the read cursor, advancing the cursor
    /// by one stride.
    ///
    /// On failure the cursor does not move and no record is returned.
    ///
    /// # Errors
    ///
    /// - `RECSTORE_INVALID_STATE` if the store is closed
    /// - `RECSTORE_END_OF_DATA` if fewer than one stride of bytes remain
    /// - `RECSTORE_IO_ERROR` if the read itself fails
    /// - `RECSTORE_CORRUPT_RECORD` if the block cannot be decoded
    pub fn read_record(&mut self) -> StoreResult<R> {
        let offset = self.read_cursor;
        let stride = R::ENCODED_LEN;
        let file = open_file(&mut self.handle, "read record")?;

        let remaining = file_len(file)?.saturating_sub(offset);
        if remaining < stride as u64 {
            self.at_end = true;
            Logger::trace(
                "STORE_END_OF_DATA",
                &[
                    ("offset", offset.to_string().as_str()),
                    ("remaining", remaining.to_string().as_str()),
                ],
            );
            return Err(StoreError::end_of_data(offset, remaining, stride));
        }

        let mut block = vec![0u8; stride];
        seek_to(file, offset)?;
        if let Err(e) = file.read_exact(&mut block) {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                self.at_end = true;
                return Err(StoreError::end_of_data(offset, remaining, stride));
            }
            Logger::error(
                "STORE_READ_FAILED",
                &[
                    ("path", self.path.display().to_string().as_str()),
                    ("offset", offset.to_string().as_str()),
                ],
            );
            return Err(StoreError::io_error(
                format!("Failed to read record at offset {}", offset),
                e,
            ));
        }

        let record = R::decode(&block).map_err(|e| StoreError::corrupt_record(offset, e))?;
        self.read_cursor = offset + stride as u64;
        Ok(record)
    }

    /// Reads records from the read cursor until end of data.
    pub fn read_all(&mut self) -> StoreResult<Vec<R>> {
        let mut records = Vec::new();
        loop {
            match self.read_record() {
                Ok(record) => records.push(record),
                Err(e) if e.is_end_of_data() => break,
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    /// Positions the read cursor at record `index`.
    pub fn seek_read(&mut self, index: u64) -> StoreResult<()> {
        open_file(&mut self.handle, "seek read cursor")?;
        self.read_cursor = Self::offset_of(index)?;
        self.at_end = false;
        Ok(())
    }

    /// Positions the write cursor at record `index`. Writing past the end
    /// extends the file; skipped blocks read back as zero-filled records.
    pub fn seek_write(&mut self, index: u64) -> StoreResult<()> {
        open_file(&mut self.handle, "seek write cursor")?;
        self.write_cursor = Self::offset_of(index)?;
        Ok(())
    }

    /// Reads record `index` and leaves the read cursor after it.
    pub fn read_at(&mut self, index: u64) -> StoreResult<R> {
        self.seek_read(index)?;
        self.read_record()
    }

    /// Writes `record` at `index` and leaves the write cursor after it.
    pub fn write_at(&mut self, index: u64, record: &R) -> StoreResult<()> {
        self.seek_write(index)?;
        self.write_record(record)
    }

    /// Number of complete blocks in the file.
    pub fn record_count(&mut self) -> StoreResult<u64> {
        let file = open_file(&mut self.handle, "count records")?;
        Ok(file_len(file)? / R::ENCODED_LEN as u64)
    }

    /// Bytes after the last complete block. Non-zero means a torn tail.
    pub fn trailing_bytes(&mut self) -> StoreResult<u64> {
        let file = open_file(&mut self.handle, "count trailing bytes")?;
        Ok(file_len(file)? % R::ENCODED_LEN as u64)
    }

    /// CRC32 of the whole file content.
    pub fn content_checksum(&mut self) -> StoreResult<u32> {
        let file = open_file(&mut self.handle, "checksum content")?;
        seek_to(file, 0)?;
        checksum_reader(file).map_err(|e| StoreError::io_error("Failed to checksum file", e))
    }

    fn offset_of(index: u64) -> StoreResult<u64> {
        index.checked_mul(R::ENCODED_LEN as u64).ok_or_else(|| {
            StoreError::io_error(
                format!("Record index {} is out of range", index),
                io::Error::new(io::ErrorKind::InvalidInput, "offset overflow"),
            )
        })
    }

    /// Returns the store's file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> StoreState {
        self.handle.state()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Byte offset of the next read
    pub fn read_cursor(&self) -> u64 {
        self.read_cursor
    }

    /// Byte offset of the next write
    pub fn write_cursor(&self) -> u64 {
        self.write_cursor
    }

    /// True once a read has run out of data, until a cursor is repositioned.
    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    /// Size of one encoded record
    pub fn stride(&self) -> usize {
        R::ENCODED_LEN
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }
}

fn write_block(file: &mut File, block: &[u8], offset: u64) -> StoreResult<()> {
    let mut written = 0;
    while written < block.len() {
        match file.write(&block[written..]) {
            Ok(0) => return Err(StoreError::incomplete_write(offset, written, block.len())),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(StoreError::io_error(
                    format!("Failed to write record at offset {}", offset),
                    e,
                ))
            }
        }
    }
    Ok(())
}

impl<R: FixedRecord> Drop for RecordStore<R> {
    fn drop(&mut self) {
        if self.is_open() {
            Logger::trace(
                "STORE_DROPPED_OPEN",
                &[("path", self.path.display().to_string().as_str())],
            );
        }
    }
}
