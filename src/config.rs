//! Run configuration
//!
//! A run needs an image path and a destination root; both can come from a
//! TOML file, and command-line values override whatever the file says.
//!
//! ```toml
//! image = "dumps/NAND_AUTO_2534.BIN"
//! output = "recovered"
//! journal = "nandcarve.log"
//! verbose = false
//! progress = true
//! ```

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::nand::errors::{NandError, NandResult};

/// Prefix of the default destination directory name
pub const DEFAULT_OUTPUT_PREFIX: &str = "unpack_";

/// Settings for one carving run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarveConfig {
    /// Raw image to read
    pub image: Option<PathBuf>,
    /// Destination root; derived from the image path when unset
    pub output: Option<PathBuf>,
    /// Journal file; no journal when unset
    pub journal: Option<PathBuf>,
    /// Debug-level logging
    pub verbose: bool,
    /// Draw a progress bar while extracting
    pub progress: bool,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            image: None,
            output: None,
            journal: None,
            verbose: false,
            progress: true,
        }
    }
}

impl CarveConfig {
    /// Parses a configuration from TOML text
    ///
    /// Unknown keys are ignored. A known key with the wrong type is an error.
    pub fn from_toml_str(content: &str) -> NandResult<Self> {
        let value: toml::Value = content.parse()
            .map_err(|e| NandError::InvalidConfig(format!("TOML parse error: {}", e)))?;

        let table = value.as_table()
            .ok_or_else(|| NandError::InvalidConfig("top level must be a table".to_string()))?;

        let mut config = CarveConfig::default();
        config.image = Self::path_value(table, "image")?;
        config.output = Self::path_value(table, "output")?;
        config.journal = Self::path_value(table, "journal")?;
        if let Some(verbose) = Self::bool_value(table, "verbose")? {
            config.verbose = verbose;
        }
        if let Some(progress) = Self::bool_value(table, "progress")? {
            config.progress = progress;
        }

        debug!("Parsed configuration: {:?}", config);
        Ok(config)
    }

    /// Loads a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> NandResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| NandError::InvalidConfig(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    fn path_value(table: &toml::value::Table, key: &str) -> NandResult<Option<PathBuf>> {
        match table.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(PathBuf::from(s))),
            Some(other) => Err(NandError::InvalidConfig(
                format!("'{}' must be a string, found {}", key, other.type_str()))),
        }
    }

    fn bool_value(table: &toml::value::Table, key: &str) -> NandResult<Option<bool>> {
        match table.get(key) {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(NandError::InvalidConfig(
                format!("'{}' must be a boolean, found {}", key, other.type_str()))),
        }
    }

    /// Image path, or an error if none was given
    pub fn image_path(&self) -> NandResult<&Path> {
        self.image.as_deref()
            .ok_or_else(|| NandError::InvalidConfig("no input image given".to_string()))
    }

    /// Destination root, defaulting to `unpack_<image name>` next to the image
    pub fn output_dir(&self) -> NandResult<PathBuf> {
        match &self.output {
            Some(dir) => Ok(dir.clone()),
            None => Ok(default_output_dir(self.image_path()?)),
        }
    }
}

/// Default destination root for an image: `unpack_<file name>` beside it
pub fn default_output_dir(image: &Path) -> PathBuf {
    let name = image.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let dir_name = format!("{}{}", DEFAULT_OUTPUT_PREFIX, name);

    match image.parent() {
        Some(parent) => parent.join(dir_name),
        None => PathBuf::from(dir_name),
    }
}
