//! Operation journal and global logging setup
//!
//! `Logger` is the journal handed to commands and the extraction driver: it
//! records what was decoded and written, either to a file or nowhere.
//! Diagnostics go through the `log` facade, installed by
//! `Logger::init_global_logger`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use env_logger::Env;

use crate::nand::types::DirectoryTable;

/// Journal of carving operations
pub struct Logger {
    /// File handle for journal output, `None` for a discarding journal
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a journal writing to a file
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the journal file, truncated if it exists
    pub fn new<P: AsRef<Path>>(log_file: P) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Creates a journal that discards every message
    pub fn null() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Appends a line to the journal
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "journal lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Records every entry of a decoded directory table
    pub fn log_directory(&self, table: &DirectoryTable) -> io::Result<()> {
        self.log(&format!("Directory at {:#x}: {} entries", table.offset, table.len()))?;

        for entry in table.iter() {
            let message = format!(
                "  {}: attr={}, length={}, offset={} (byte offset {:#x})",
                entry.filename.escape_default(), entry.ext_attr1_hex(), entry.file_length,
                entry.data_offset_hex(), entry.byte_offset()
            );
            self.log(&message)?;
        }

        Ok(())
    }

    /// Installs the process-wide `log` backend
    ///
    /// Honors `RUST_LOG`; otherwise logs at `info`, or `debug` when verbose.
    pub fn init_global_logger(verbose: bool) {
        let default_level = if verbose { "debug" } else { "info" };
        let result = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
            .format_timestamp_secs()
            .try_init();

        if result.is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}
