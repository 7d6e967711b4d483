//! I/O layers over raw NAND images
//!
//! This module provides the marker-aware raw reader and the marker-skipping
//! logical reader built on top of it.

pub mod seekable;
pub mod page_reader;
pub mod marker_skipper;

pub use page_reader::{PageRead, RawPageReader};
pub use marker_skipper::MarkerSkippingReader;
