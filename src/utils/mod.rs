//! Utility modules for common functionality
//!
//! This module provides the journal logger, progress reporting and the
//! small string and formatting helpers used throughout the application.

pub mod logger;
pub(crate) mod progress;
pub(crate) mod string_utils;
pub mod format_utils;
