//! File extraction command
//!
//! Decodes the root directory, prints it, then carves every entry into the
//! destination directory.

use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::commands::list_command::display_directory;
use crate::config::CarveConfig;
use crate::extractor::{DirectorySink, ExtractionDriver};
use crate::io::page_reader::RawPageReader;
use crate::nand::errors::NandResult;
use crate::nand::types::DirectoryTable;
use crate::utils::logger::Logger;

/// Command for extracting all files of a NAND image
pub struct ExtractCommand<'a> {
    /// Run configuration
    config: CarveConfig,
    /// Journal for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    pub fn new(config: CarveConfig, logger: &'a Logger) -> NandResult<Self> {
        config.image_path()?;
        Ok(ExtractCommand { config, logger })
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> NandResult<()> {
        let image = self.config.image_path()?;
        let output_dir = self.config.output_dir()?;
        info!("Extracting {} into {}", image.display(), output_dir.display());

        let mut reader = RawPageReader::open(image)?;
        let table = DirectoryTable::read(&mut reader)?;

        display_directory(&table);
        self.logger.log_directory(&table)?;

        let mut sink = DirectorySink::new(&output_dir)?;
        let summary = ExtractionDriver::new(self.logger)
            .with_progress(self.config.progress)
            .extract_all(&mut reader, &table, &mut sink)?;

        for file in &summary.files {
            debug!("  {} ({} bytes)", sink.path_for(&file.name).display(), file.bytes);
        }
        info!("Done: {} files written to {}", summary.files.len(), sink.root().display());

        Ok(())
    }
}
