//! String utility functions
//!
//! Utilities for turning raw directory bytes into names usable on disk.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // NUL and path separators must not reach the output file system
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r"[\x00/\\]").expect("valid filename regex");
}

/// Trims trailing null characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() && buffer[buffer.len() - 1] == 0 {
        buffer.pop();
    }
}

/// Replaces embedded NULs and path separators with underscores
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}
