//! Custom error types for NAND image processing

use std::fmt;
use std::io;

/// NAND image error types
#[derive(Debug)]
pub enum NandError {
    /// I/O error
    IoError(io::Error),
    /// Seek relative to the end of the image was requested
    UnsupportedSeek,
    /// The image ended before a logical read could be satisfied
    UnexpectedEndOfStream { requested: usize, read: usize },
    /// A directory filename field is not ASCII
    FilenameDecodeError(Vec<u8>),
    /// An output file could not be created
    DestinationCreateError { path: String, source: io::Error },
    /// Configuration file or option is invalid
    InvalidConfig(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for NandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NandError::IoError(e) => write!(f, "I/O error: {}", e),
            NandError::UnsupportedSeek => write!(f, "Seeking from the end of the image is not supported"),
            NandError::UnexpectedEndOfStream { requested, read } => {
                write!(f, "Unexpected end of image: requested {} bytes, got {}", requested, read)
            }
            NandError::FilenameDecodeError(buf) => write!(f, "Cannot decode filename from {:02X?}", buf),
            NandError::DestinationCreateError { path, source } => {
                write!(f, "Cannot create output file {}: {}", path, source)
            }
            NandError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            NandError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for NandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NandError::IoError(e) => Some(e),
            NandError::DestinationCreateError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for NandError {
    fn from(error: io::Error) -> Self {
        NandError::IoError(error)
    }
}

/// Result type for NAND image operations
pub type NandResult<T> = Result<T, NandError>;

impl From<String> for NandError {
    fn from(msg: String) -> Self {
        NandError::GenericError(msg)
    }
}
