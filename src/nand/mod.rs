//! NAND image format module
//!
//! This module provides the format constants, error types and the root
//! directory decoder for page-oriented NAND dumps.

pub mod errors;
pub mod constants;
pub mod entry;
pub mod directory;
pub mod types;
#[cfg(test)]
mod tests;

pub use crate::io::page_reader::{PageRead, RawPageReader};
pub use crate::io::marker_skipper::MarkerSkippingReader;
pub use errors::{NandError, NandResult};
pub use entry::{decode_filename, DirectoryEntry};
pub use directory::{DirectoryCursor, DirectoryTableParser, TableEnd};
pub use types::DirectoryTable;
