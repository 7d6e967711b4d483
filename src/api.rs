use log::info;
use std::path::Path;

use crate::extractor::{DirectorySink, ExtractionDriver, ExtractionSummary, OutputSink};
use crate::io::page_reader::RawPageReader;
use crate::nand::errors::NandResult;
use crate::nand::types::DirectoryTable;
use crate::utils::format_utils;
use crate::utils::logger::Logger;

/// Main interface to the nandcarve library
pub struct NandCarve {
    logger: Logger,
}

impl NandCarve {
    /// Create a new NandCarve instance
    ///
    /// # Arguments
    /// * `journal` - Optional path to a journal file; nothing is journaled without one
    ///
    /// # Returns
    /// A NandCarve instance or an error if the journal cannot be created
    pub fn new(journal: Option<&Path>) -> NandResult<Self> {
        let logger = match journal {
            Some(path) => Logger::new(path)?,
            None => Logger::null(),
        };
        Ok(NandCarve { logger })
    }

    /// Decode the root directory of an image
    pub fn read_directory<P: AsRef<Path>>(&self, image: P) -> NandResult<DirectoryTable> {
        let mut reader = RawPageReader::open(image)?;
        let table = DirectoryTable::read(&mut reader)?;
        self.logger.log_directory(&table)?;
        Ok(table)
    }

    /// Render the root directory of an image as a text table
    pub fn list<P: AsRef<Path>>(&self, image: P) -> NandResult<String> {
        let table = self.read_directory(image)?;
        Ok(format_utils::format_directory_table(&table))
    }

    /// Extract every file of an image into a directory
    ///
    /// # Arguments
    /// * `image` - Path to the raw NAND image
    /// * `output_dir` - Destination root, created if missing
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(&self, image: P, output_dir: Q) -> NandResult<ExtractionSummary> {
        let mut sink = DirectorySink::new(output_dir.as_ref())?;
        self.extract_to(image, &mut sink)
    }

    /// Extract every file of an image into any output sink
    pub fn extract_to<P: AsRef<Path>, S: OutputSink + ?Sized>(&self, image: P, sink: &mut S) -> NandResult<ExtractionSummary> {
        let image = image.as_ref();
        info!("Extracting files from {}", image.display());

        let mut reader = RawPageReader::open(image)?;
        let table = DirectoryTable::read(&mut reader)?;
        self.logger.log_directory(&table)?;

        ExtractionDriver::new(&self.logger).extract_all(&mut reader, &table, sink)
    }
}
