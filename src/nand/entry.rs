//! Directory entry structure
//!
//! One 32-byte record of the root directory table, decoded into typed
//! fields. Spacer bytes are not retained.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

use crate::nand::constants::layout::BLOCK_SZ;
use crate::nand::constants::record::{DATA_OFFSET_SHIFT, EXT_ATTR_1_SZ, EXT_ATTR_2_SZ};
use crate::nand::errors::{NandError, NandResult};
use crate::utils::format_utils;
use crate::utils::string_utils;

/// A decoded directory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File name with trailing NULs removed
    pub filename: String,
    /// First extended attribute field, kept raw
    pub ext_attr1: [u8; EXT_ATTR_1_SZ],
    /// Payload length in bytes
    pub file_length: u32,
    /// Data offset field: block number shifted left by 4 bits
    pub data_offset_field: [u8; EXT_ATTR_2_SZ],
}

impl DirectoryEntry {
    /// Creates a new directory entry
    pub fn new(
        filename: String,
        ext_attr1: [u8; EXT_ATTR_1_SZ],
        file_length: u32,
        data_offset_field: [u8; EXT_ATTR_2_SZ],
    ) -> Self {
        DirectoryEntry {
            filename,
            ext_attr1,
            file_length,
            data_offset_field,
        }
    }

    /// First extended attribute as `0x`-prefixed uppercase hex
    pub fn ext_attr1_hex(&self) -> String {
        format_utils::to_hex_string(&self.ext_attr1)
    }

    /// Data offset field as `0x`-prefixed uppercase hex
    pub fn data_offset_hex(&self) -> String {
        format_utils::to_hex_string(&self.data_offset_field)
    }

    /// Data offset field read as a big-endian number
    pub fn data_offset_value(&self) -> u16 {
        BigEndian::read_u16(&self.data_offset_field)
    }

    /// Block holding the first payload byte
    pub fn block_offset(&self) -> u64 {
        (self.data_offset_value() >> DATA_OFFSET_SHIFT) as u64
    }

    /// Raw image offset of the first payload byte
    pub fn byte_offset(&self) -> u64 {
        self.block_offset() * BLOCK_SZ
    }

    /// File name safe to use as a single path component
    pub fn sanitized_filename(&self) -> String {
        string_utils::sanitize_filename(&self.filename)
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (attr: {}, length: {}, offset: {})",
               self.filename, self.ext_attr1_hex(), self.file_length, self.data_offset_hex())
    }
}

/// Decodes a raw filename field
///
/// The name is everything up to and including the last non-zero byte, so
/// NULs embedded before that byte are kept. An all-zero field decodes to an
/// empty name.
///
/// # Errors
/// `NandError::FilenameDecodeError` if the kept bytes are not ASCII.
pub fn decode_filename(raw: &[u8]) -> NandResult<String> {
    let mut name = raw.to_vec();
    string_utils::trim_trailing_nulls(&mut name);

    if !name.is_ascii() {
        return Err(NandError::FilenameDecodeError(raw.to_vec()));
    }

    String::from_utf8(name).map_err(|_| NandError::FilenameDecodeError(raw.to_vec()))
}
