//! Seekable byte store trait
//!
//! The page readers work on anything that can read and seek: an opened
//! image file, or an in-memory buffer in tests.

use std::io::{Read, Seek};

/// Trait for byte stores that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
