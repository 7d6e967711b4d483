//! Output destinations for carved files
//!
//! The driver only needs somewhere to open a named output and stream bytes
//! into it. `DirectorySink` writes real files under a destination root,
//! `MemorySink` keeps them in memory.

use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::nand::errors::{NandError, NandResult};

/// A destination that can open named outputs
pub trait OutputSink {
    /// Opens a new output called `name`, replacing any earlier one
    ///
    /// # Errors
    /// `NandError::DestinationCreateError` if the output cannot be created.
    fn create<'s>(&'s mut self, name: &str) -> NandResult<Box<dyn Write + 's>>;
}

/// Writes each output as a file directly under a root directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates the root directory if needed
    pub fn new<P: Into<PathBuf>>(root: P) -> NandResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| NandError::DestinationCreateError {
            path: root.display().to_string(),
            source,
        })?;
        debug!("Writing carved files to {}", root.display());
        Ok(DirectorySink { root })
    }

    /// Destination root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an output called `name` is written to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl OutputSink for DirectorySink {
    fn create<'s>(&'s mut self, name: &str) -> NandResult<Box<dyn Write + 's>> {
        let path = self.path_for(name);
        let file = File::create(&path).map_err(|source| NandError::DestinationCreateError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Keeps outputs in memory, in creation order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    files: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Contents of the output called `name`
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Output names in creation order
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl OutputSink for MemorySink {
    fn create<'s>(&'s mut self, name: &str) -> NandResult<Box<dyn Write + 's>> {
        let index = match self.files.iter().position(|(n, _)| n == name) {
            Some(index) => {
                self.files[index].1.clear();
                index
            }
            None => {
                self.files.push((name.to_string(), Vec::new()));
                self.files.len() - 1
            }
        };
        Ok(Box::new(&mut self.files[index].1))
    }
}
