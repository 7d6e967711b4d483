//! Root directory table parser
//!
//! Directory records are decoded straight through `RawPageReader`, not the
//! logical view, so a record is never silently spliced across a marker run.
//! When a read inside a record hits a marker boundary, the partial record is
//! dropped and decoding restarts right after the marker run.
//!
//! The table has no record count. It ends at the first empty or undecodable
//! filename, or where the image runs out.

use byteorder::{BigEndian, ByteOrder};
use log::{debug, trace};
use std::io::SeekFrom;
use std::iter::FusedIterator;

use crate::io::page_reader::{PageRead, RawPageReader};
use crate::io::seekable::SeekableReader;
use crate::nand::constants::directory::FS_ROOT_DIR_START;
use crate::nand::constants::layout::DELIM_SZ;
use crate::nand::constants::record::{
    EXT_ATTR_1_SZ, EXT_ATTR_2_SZ, FILENAME_SZ, FILE_LEN_SZ, SPACER_1_SZ, SPACER_2_SZ,
};
use crate::nand::entry::{decode_filename, DirectoryEntry};
use crate::nand::errors::{NandError, NandResult};

/// Why the directory table stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEnd {
    /// The filename field was all zero
    EmptyFilename,
    /// The filename field was not ASCII
    UndecodableFilename,
    /// The image ended inside a record
    EndOfImage,
}

/// Parsing state of a directory table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryCursor {
    /// Raw offset where the next record is decoded
    pub position: u64,
    /// Records decoded so far
    pub records: usize,
    /// Marker runs skipped so far
    pub resyncs: usize,
}

impl DirectoryCursor {
    /// Creates a cursor at a raw offset
    pub fn new(position: u64) -> Self {
        DirectoryCursor { position, records: 0, resyncs: 0 }
    }

    /// Moves past a fully decoded record
    pub fn advance(&mut self, next_position: u64) {
        self.position = next_position;
        self.records += 1;
    }

    /// Moves past the marker run at `reached_at`, dropping any partial record
    pub fn resync(&mut self, reached_at: u64) {
        self.position = reached_at + DELIM_SZ;
        self.resyncs += 1;
    }
}

/// Result of decoding a single record
enum RecordOutcome {
    Entry(DirectoryEntry),
    Boundary(u64),
    End(TableEnd),
}

/// Reads one field, or returns the outcome that interrupted it
macro_rules! field {
    ($parser:expr, $size:expr) => {
        match $parser.read_field($size)? {
            Ok(bytes) => bytes,
            Err(outcome) => return Ok(outcome),
        }
    };
}

/// Lazy, non-restartable sequence of directory entries
///
/// Yields `Ok(entry)` per record. Normal table termination ends the
/// sequence; an I/O failure is yielded once as `Err` and ends it as well.
pub struct DirectoryTableParser<'a, R: SeekableReader> {
    /// Raw reader positioned by the cursor before every record
    reader: &'a mut RawPageReader<R>,
    /// Parsing state
    cursor: DirectoryCursor,
    /// Set once the sequence is over
    finished: bool,
    /// Reason for normal termination
    end: Option<TableEnd>,
}

impl<'a, R: SeekableReader> DirectoryTableParser<'a, R> {
    /// Creates a parser for the root directory
    pub fn new(reader: &'a mut RawPageReader<R>) -> Self {
        Self::with_offset(reader, FS_ROOT_DIR_START)
    }

    /// Creates a parser starting at an arbitrary raw offset
    pub fn with_offset(reader: &'a mut RawPageReader<R>, offset: u64) -> Self {
        DirectoryTableParser {
            reader,
            cursor: DirectoryCursor::new(offset),
            finished: false,
            end: None,
        }
    }

    /// Current parsing state
    pub fn cursor(&self) -> &DirectoryCursor {
        &self.cursor
    }

    /// Why the table ended, once it has
    pub fn end_reason(&self) -> Option<TableEnd> {
        self.end
    }

    /// Reads `size` raw bytes of the current record
    fn read_field(&mut self, size: usize) -> NandResult<Result<Vec<u8>, RecordOutcome>> {
        match self.reader.read(size)? {
            PageRead::Bytes(bytes) if bytes.len() == size => Ok(Ok(bytes)),
            PageRead::Bytes(_) => Ok(Err(RecordOutcome::End(TableEnd::EndOfImage))),
            PageRead::MarkerBoundary { reached_at, requested } => {
                trace!("Record field of {} bytes hit marker at {:#x}", requested, reached_at);
                Ok(Err(RecordOutcome::Boundary(reached_at)))
            }
        }
    }

    /// Decodes one record at the reader's position
    fn decode_record(&mut self) -> NandResult<RecordOutcome> {
        let raw_name = field!(self, FILENAME_SZ);
        let filename = match decode_filename(&raw_name) {
            Ok(name) if name.is_empty() => return Ok(RecordOutcome::End(TableEnd::EmptyFilename)),
            Ok(name) => name,
            Err(NandError::FilenameDecodeError(buf)) => {
                debug!("Undecodable filename {:02X?}, treating as end of table", buf);
                return Ok(RecordOutcome::End(TableEnd::UndecodableFilename));
            }
            Err(e) => return Err(e),
        };

        let mut ext_attr1 = [0u8; EXT_ATTR_1_SZ];
        ext_attr1.copy_from_slice(&field!(self, EXT_ATTR_1_SZ));

        let file_length = BigEndian::read_u32(&field!(self, FILE_LEN_SZ));

        self.reader.seek(SeekFrom::Current(SPACER_1_SZ as i64))?;

        let mut data_offset_field = [0u8; EXT_ATTR_2_SZ];
        data_offset_field.copy_from_slice(&field!(self, EXT_ATTR_2_SZ));

        self.reader.seek(SeekFrom::Current(SPACER_2_SZ as i64))?;

        Ok(RecordOutcome::Entry(DirectoryEntry::new(filename, ext_attr1, file_length, data_offset_field)))
    }
}

impl<'a, R: SeekableReader> Iterator for DirectoryTableParser<'a, R> {
    type Item = NandResult<DirectoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Err(e) = self.reader.seek(SeekFrom::Start(self.cursor.position)) {
                self.finished = true;
                return Some(Err(e));
            }

            match self.decode_record() {
                Ok(RecordOutcome::Entry(entry)) => {
                    debug!("Directory record #{} at {:#x}: {}", self.cursor.records, self.cursor.position, entry);
                    self.cursor.advance(self.reader.position());
                    return Some(Ok(entry));
                }
                Ok(RecordOutcome::Boundary(reached_at)) => {
                    debug!("Record at {:#x} crosses marker at {:#x}, resyncing at {:#x}",
                           self.cursor.position, reached_at, reached_at + DELIM_SZ);
                    self.cursor.resync(reached_at);
                }
                Ok(RecordOutcome::End(reason)) => {
                    debug!("Directory table ends at {:#x}: {:?}", self.cursor.position, reason);
                    self.finished = true;
                    self.end = Some(reason);
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<'a, R: SeekableReader> FusedIterator for DirectoryTableParser<'a, R> {}
