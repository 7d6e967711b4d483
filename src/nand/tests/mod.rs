//! Unit tests for the NAND readers, directory parser and extraction

mod marker_skipper_tests;
mod directory_tests;
