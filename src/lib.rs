pub mod io;
pub mod nand;
pub mod utils;
pub mod extractor;
pub mod config;
pub mod commands;
pub mod api;

pub use crate::api::NandCarve;

pub use nand::{DirectoryEntry, DirectoryTable, NandError, NandResult};
pub use io::{MarkerSkippingReader, PageRead, RawPageReader};
pub use extractor::{DirectorySink, ExtractionDriver, MemorySink, OutputSink};
pub use config::CarveConfig;
