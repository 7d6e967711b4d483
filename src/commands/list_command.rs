//! Directory listing command
//!
//! Decodes the root directory of an image and prints it as a table.

use log::info;

use crate::commands::command_traits::Command;
use crate::config::CarveConfig;
use crate::io::page_reader::RawPageReader;
use crate::nand::errors::NandResult;
use crate::nand::types::DirectoryTable;
use crate::utils::format_utils;
use crate::utils::logger::Logger;

/// Command for listing the directory of a NAND image
pub struct ListCommand<'a> {
    /// Run configuration
    config: CarveConfig,
    /// Journal for recording operations
    logger: &'a Logger,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command
    pub fn new(config: CarveConfig, logger: &'a Logger) -> NandResult<Self> {
        config.image_path()?;
        Ok(ListCommand { config, logger })
    }
}

/// Prints a decoded directory table through the log
pub(crate) fn display_directory(table: &DirectoryTable) {
    if table.is_empty() {
        info!("No valid filesystem records were detected!");
        return;
    }

    info!("Directory at {:#x}, {} entries:\n{}",
          table.offset, table.len(), format_utils::format_directory_table(table));
}

impl<'a> Command for ListCommand<'a> {
    fn execute(&self) -> NandResult<()> {
        let image = self.config.image_path()?;
        info!("Listing directory of {}", image.display());

        let mut reader = RawPageReader::open(image)?;
        let table = DirectoryTable::read(&mut reader)?;

        display_directory(&table);
        self.logger.log_directory(&table)?;

        Ok(())
    }
}
