//! Logical, marker-free view of a NAND image
//!
//! File payloads are stored in the logical stream: the raw image with every
//! marker run removed. `MarkerSkippingReader` splits reads around marker
//! boundaries and steps over each run, so callers see contiguous data.

use log::trace;
use std::io::{SeekFrom, Write};

use crate::io::page_reader::{PageRead, RawPageReader};
use crate::io::seekable::SeekableReader;
use crate::nand::constants::layout::DELIM_SZ;
use crate::nand::errors::{NandError, NandResult};

/// Reads logical bytes through a `RawPageReader`, hiding marker runs
pub struct MarkerSkippingReader<'a, R: SeekableReader> {
    /// Raw reader sharing the image position with the caller
    inner: &'a mut RawPageReader<R>,
}

impl<'a, R: SeekableReader> MarkerSkippingReader<'a, R> {
    /// Creates a logical reader starting at the raw reader's position
    pub fn new(inner: &'a mut RawPageReader<R>) -> Self {
        MarkerSkippingReader { inner }
    }

    /// Current raw position of the underlying reader
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Reads exactly `n` logical bytes
    ///
    /// # Errors
    /// `NandError::UnexpectedEndOfStream` if the image ends first.
    pub fn read(&mut self, n: usize) -> NandResult<Vec<u8>> {
        let mut result = Vec::with_capacity(n);

        while result.len() < n {
            let remaining = n - result.len();
            match self.inner.read(remaining)? {
                PageRead::Bytes(bytes) => {
                    let short = bytes.len() < remaining;
                    result.extend_from_slice(&bytes);
                    if short {
                        return Err(NandError::UnexpectedEndOfStream { requested: n, read: result.len() });
                    }
                }
                PageRead::MarkerBoundary { reached_at, .. } => {
                    let before_marker = reached_at.saturating_sub(self.inner.position()) as usize;
                    if before_marker > 0 {
                        if let PageRead::Bytes(bytes) = self.inner.read(before_marker)? {
                            let short = bytes.len() < before_marker;
                            result.extend_from_slice(&bytes);
                            if short {
                                return Err(NandError::UnexpectedEndOfStream { requested: n, read: result.len() });
                            }
                        }
                    }
                    trace!("Skipping marker run at {:#x}", reached_at);
                    self.inner.seek(SeekFrom::Start(reached_at + DELIM_SZ))?;
                }
            }
        }

        Ok(result)
    }

    /// Copies `n` logical bytes to `writer` in chunks of at most `chunk_size`
    ///
    /// Each chunk is written as soon as it has been read. Returns the number
    /// of bytes written, which is always `n` on success.
    pub fn read_into<W: Write + ?Sized>(&mut self, writer: &mut W, n: u64, chunk_size: usize) -> NandResult<u64> {
        let chunk_size = chunk_size.max(1) as u64;
        let mut to_be_read = n;
        while to_be_read > 0 {
            let chunk = self.read(to_be_read.min(chunk_size) as usize)?;
            writer.write_all(&chunk)?;
            to_be_read -= chunk.len() as u64;
        }
        Ok(n)
    }
}
