//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod list_command;
pub mod extract_command;

pub use command_traits::{Command, CommandFactory};
pub use list_command::ListCommand;
pub use extract_command::ExtractCommand;

use clap::ArgMatches;
use std::path::PathBuf;

use crate::config::CarveConfig;
use crate::nand::errors::NandResult;
use crate::utils::logger::Logger;

/// Builds the run configuration from CLI arguments
///
/// Starts from the `--config` file when one is given, then applies
/// command-line values on top.
pub fn config_from_args(args: &ArgMatches) -> NandResult<CarveConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => CarveConfig::load(path)?,
        None => CarveConfig::default(),
    };

    if let Some(image) = args.get_one::<String>("input") {
        config.image = Some(PathBuf::from(image));
    }
    if let Some(output) = args.get_one::<String>("output") {
        config.output = Some(PathBuf::from(output));
    }
    if let Some(journal) = args.get_one::<String>("journal") {
        config.journal = Some(PathBuf::from(journal));
    }
    if args.get_flag("verbose") {
        config.verbose = true;
    }
    if args.get_flag("no-progress") {
        config.progress = false;
    }

    Ok(config)
}

/// Factory for creating command instances based on CLI arguments
pub struct NandcarveCommandFactory;

impl NandcarveCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        NandcarveCommandFactory
    }
}

impl Default for NandcarveCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for NandcarveCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: CarveConfig, logger: &'a Logger)
        -> NandResult<Box<dyn Command + 'a>> {
        if args.get_flag("list") {
            Ok(Box::new(ListCommand::new(config, logger)?))
        } else {
            // Default: list, then extract
            Ok(Box::new(ExtractCommand::new(config, logger)?))
        }
    }
}
