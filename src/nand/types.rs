//! Core directory table structure

use log::info;
use std::fmt;

use crate::io::page_reader::RawPageReader;
use crate::io::seekable::SeekableReader;
use crate::nand::constants::directory::FS_ROOT_DIR_START;
use crate::nand::directory::DirectoryTableParser;
use crate::nand::entry::DirectoryEntry;
use crate::nand::errors::NandResult;

/// The root directory of a NAND image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTable {
    /// Entries in on-flash order
    pub entries: Vec<DirectoryEntry>,
    /// Raw offset of the first record
    pub offset: u64,
    /// Number of marker runs skipped while reading the table
    pub resyncs: usize,
}

impl DirectoryTable {
    /// Reads the root directory from its fixed location
    pub fn read<R: SeekableReader>(reader: &mut RawPageReader<R>) -> NandResult<Self> {
        Self::read_at(reader, FS_ROOT_DIR_START)
    }

    /// Reads a directory table starting at a raw offset
    pub fn read_at<R: SeekableReader>(reader: &mut RawPageReader<R>, offset: u64) -> NandResult<Self> {
        let mut parser = DirectoryTableParser::with_offset(reader, offset);
        let entries = parser.by_ref().collect::<NandResult<Vec<_>>>()?;
        let resyncs = parser.cursor().resyncs;

        info!("Read {} directory records at {:#x} ({} marker resyncs, end: {:?})",
              entries.len(), offset, resyncs, parser.end_reason());

        Ok(DirectoryTable { entries, offset, resyncs })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in table order
    pub fn iter(&self) -> std::slice::Iter<'_, DirectoryEntry> {
        self.entries.iter()
    }

    /// Sum of all declared file lengths
    pub fn total_length(&self) -> u64 {
        self.entries.iter().map(|e| e.file_length as u64).sum()
    }
}

impl<'a> IntoIterator for &'a DirectoryTable {
    type Item = &'a DirectoryEntry;
    type IntoIter = std::slice::Iter<'a, DirectoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for DirectoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Directory at {:#x} ({} entries)", self.offset, self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "  {}", entry)?;
        }
        Ok(())
    }
}
