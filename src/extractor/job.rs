//! Single-file extraction job

use log::debug;
use std::io::{SeekFrom, Write};

use crate::extractor::sink::OutputSink;
use crate::io::marker_skipper::MarkerSkippingReader;
use crate::io::page_reader::RawPageReader;
use crate::io::seekable::SeekableReader;
use crate::nand::constants::layout::READ_CHUNK_SIZE;
use crate::nand::entry::DirectoryEntry;
use crate::nand::errors::NandResult;

/// Copies one directory entry's payload into a named output
///
/// A job lives for one copy: the output is created, filled and closed
/// within `run`. An error mid-copy leaves a truncated output behind.
#[derive(Debug, Clone)]
pub struct ExtractionJob<'e> {
    /// Entry being extracted
    entry: &'e DirectoryEntry,
    /// Sanitized output name
    name: String,
}

impl<'e> ExtractionJob<'e> {
    pub fn new(entry: &'e DirectoryEntry) -> Self {
        ExtractionJob {
            entry,
            name: entry.sanitized_filename(),
        }
    }

    /// Output name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw image offset of the payload
    pub fn offset(&self) -> u64 {
        self.entry.byte_offset()
    }

    /// Declared payload length
    pub fn length(&self) -> u64 {
        self.entry.file_length as u64
    }

    /// Runs the copy, returning the number of bytes written
    pub fn run<R, S>(&self, reader: &mut RawPageReader<R>, sink: &mut S) -> NandResult<u64>
    where
        R: SeekableReader,
        S: OutputSink + ?Sized,
    {
        reader.seek(SeekFrom::Start(self.offset()))?;
        debug!("Copying {} bytes for {} from {:#x}", self.length(), self.name, self.offset());

        let mut output = sink.create(&self.name)?;
        let mut logical = MarkerSkippingReader::new(reader);
        let written = logical.read_into(&mut output, self.length(), READ_CHUNK_SIZE)?;
        output.flush()?;

        Ok(written)
    }
}
