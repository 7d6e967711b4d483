//! File carving from decoded NAND directories
//!
//! This module maps directory entries to payload ranges and copies them
//! through the marker-skipping reader into an output sink.

mod job;
mod sink;
mod driver;

pub use job::ExtractionJob;
pub use sink::{DirectorySink, MemorySink, OutputSink};
pub use driver::{ExtractedFile, ExtractionDriver, ExtractionSummary};
