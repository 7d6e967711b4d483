//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use crate::config::CarveConfig;
use crate::nand::errors::NandResult;
use crate::utils::logger::Logger;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    ///
    /// # Returns
    /// Result indicating success or an error
    fn execute(&self) -> NandResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap, used to pick the command
    /// * `config` - Run configuration merged from file and arguments
    /// * `logger` - Journal for recording operations
    fn create_command(&self, args: &clap::ArgMatches, config: CarveConfig, logger: &'a Logger)
        -> NandResult<Box<dyn Command + 'a>>;
}
