//! Marker-aware raw page reader
//!
//! A NAND image is a sequence of `PAGE_SZ` pages, each followed by a
//! `DELIM_SZ` marker run holding out-of-band bytes. `RawPageReader` reads raw
//! image bytes but refuses any read that would enter a marker run, telling
//! the caller where the run starts instead. Callers decide what to do with
//! the boundary: the directory parser resynchronizes, the payload reader
//! skips the run transparently.

use log::{info, trace};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::io::seekable::SeekableReader;
use crate::nand::constants::layout::{MARKER_PERIOD, PAGE_SZ};

/// Forward moves up to this many bytes are read and discarded instead of
/// seeking, so a buffered store keeps its buffer
const MAX_SKIP_BY_READ: u64 = MARKER_PERIOD;

/// Read buffer of an opened image file
const IMAGE_BUFFER_SIZE: usize = 64 * 1024;
use crate::nand::errors::{NandError, NandResult};

/// Outcome of a raw page read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRead {
    /// Bytes read from the current position; shorter than requested only at
    /// the end of the image
    Bytes(Vec<u8>),
    /// The read would have entered the marker run starting at `reached_at`.
    /// Nothing was consumed.
    MarkerBoundary { reached_at: u64, requested: usize },
}

/// Reader over raw image bytes that never crosses a marker run
pub struct RawPageReader<R: SeekableReader> {
    /// Underlying byte store
    inner: R,
    /// Current absolute position
    position: u64,
}

impl<R: SeekableReader> RawPageReader<R> {
    /// Wraps a byte store, starting at offset 0
    pub fn new(mut inner: R) -> NandResult<Self> {
        inner.seek(SeekFrom::Start(0))?;
        Ok(RawPageReader { inner, position: 0 })
    }

    /// Current absolute offset in the image
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Start offset of the marker run that blocks reads from the current
    /// position. Lies at or before the position when the position is already
    /// inside a marker run.
    pub fn next_marker(&self) -> u64 {
        let in_period = self.position % MARKER_PERIOD;
        self.position - in_period + PAGE_SZ
    }

    /// Number of bytes that can be read before the next marker run
    pub fn bytes_before_marker(&self) -> u64 {
        self.next_marker().saturating_sub(self.position)
    }

    /// Reads up to `n` bytes without entering a marker run
    ///
    /// A read ending exactly at the start of a marker run is allowed. If the
    /// read would go any further, `PageRead::MarkerBoundary` is returned and
    /// the position is left untouched.
    pub fn read(&mut self, n: usize) -> NandResult<PageRead> {
        let marker = self.next_marker();
        if self.position + n as u64 > marker {
            trace!("Read of {} bytes at {:#x} blocked by marker at {:#x}", n, self.position, marker);
            return Ok(PageRead::MarkerBoundary { reached_at: marker, requested: n });
        }

        let mut buffer = Vec::with_capacity(n);
        (&mut self.inner).take(n as u64).read_to_end(&mut buffer)?;
        self.position += buffer.len() as u64;
        Ok(PageRead::Bytes(buffer))
    }

    /// Moves the read position
    ///
    /// Only `SeekFrom::Start` and `SeekFrom::Current` are supported; marker
    /// arithmetic needs absolute offsets, and the end of a dump carries no
    /// meaning for the format. Short forward moves (marker runs, spacers)
    /// consume bytes from the store rather than seeking it.
    pub fn seek(&mut self, pos: SeekFrom) -> NandResult<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta).ok_or_else(|| {
                NandError::IoError(io::Error::new(io::ErrorKind::InvalidInput, "seek before start of image"))
            })?,
            SeekFrom::End(_) => return Err(NandError::UnsupportedSeek),
        };

        if target >= self.position && target - self.position <= MAX_SKIP_BY_READ {
            let skip = target - self.position;
            if skip > 0 {
                io::copy(&mut (&mut self.inner).take(skip), &mut io::sink())?;
            }
        } else {
            self.inner.seek(SeekFrom::Start(target))?;
        }

        self.position = target;
        Ok(self.position)
    }
}

impl RawPageReader<BufReader<File>> {
    /// Opens an image file read-only
    pub fn open<P: AsRef<Path>>(path: P) -> NandResult<Self> {
        let path = path.as_ref();
        info!("Opening NAND image: {}", path.display());

        let file = File::open(path)?;
        RawPageReader::new(BufReader::with_capacity(IMAGE_BUFFER_SIZE, file))
    }
}
