//! Tests for the marker-skipping logical reader

use std::io::{BufReader, SeekFrom};
use std::sync::atomic::Ordering;

use super::test_utils::{logical_bytes, patterned_image, reader_for, CountingCursor};
use crate::io::page_reader::RawPageReader;
use crate::io::marker_skipper::MarkerSkippingReader;
use crate::nand::errors::NandError;

#[test]
fn test_logical_read_matches_marker_free_reference() {
    let image = patterned_image(8192);

    for &start in &[0usize, 100, 500, 511, 528, 1000, 1040, 1567] {
        for &len in &[1usize, 12, 13, 512, 600, 1500, 2100] {
            let mut reader = reader_for(image.clone());
            reader.seek(SeekFrom::Start(start as u64)).unwrap();

            let mut logical = MarkerSkippingReader::new(&mut reader);
            let data = logical.read(len).unwrap();

            assert_eq!(data, logical_bytes(&image, start, len),
                       "logical read of {} bytes at {}", len, start);
        }
    }
}

#[test]
fn test_consecutive_reads_continue_after_marker() {
    let image = patterned_image(4096);
    let mut reader = reader_for(image.clone());
    reader.seek(SeekFrom::Start(400)).unwrap();

    let mut logical = MarkerSkippingReader::new(&mut reader);
    let first = logical.read(112).unwrap();
    let second = logical.read(10).unwrap();

    assert_eq!(first, image[400..512].to_vec());
    assert_eq!(second, image[528..538].to_vec());
    assert_eq!(logical.position(), 538);
}

#[test]
fn test_read_starting_inside_marker_skips_rest_of_run() {
    let image = patterned_image(2048);
    let mut reader = reader_for(image.clone());
    reader.seek(SeekFrom::Start(520)).unwrap();

    let mut logical = MarkerSkippingReader::new(&mut reader);
    let data = logical.read(4).unwrap();

    assert_eq!(data, image[528..532].to_vec());
}

#[test]
fn test_end_of_image_is_an_error() {
    let image = patterned_image(600);
    let mut reader = reader_for(image);
    reader.seek(SeekFrom::Start(500)).unwrap();

    let mut logical = MarkerSkippingReader::new(&mut reader);
    let result = logical.read(200);

    match result {
        Err(NandError::UnexpectedEndOfStream { requested, read }) => {
            assert_eq!(requested, 200);
            assert_eq!(read, 12 + 72);
        }
        other => panic!("expected UnexpectedEndOfStream, got {:?}", other),
    }
}

#[test]
fn test_read_into_writes_all_chunks() {
    let image = patterned_image(4096);
    let mut reader = reader_for(image.clone());

    let mut logical = MarkerSkippingReader::new(&mut reader);
    let mut output = Vec::new();
    let written = logical.read_into(&mut output, 1300, 512).unwrap();

    assert_eq!(written, 1300);
    assert_eq!(output, logical_bytes(&image, 0, 1300));
}

#[test]
fn test_zero_length_read() {
    let mut reader = reader_for(patterned_image(1024));
    let mut logical = MarkerSkippingReader::new(&mut reader);

    assert!(logical.read(0).unwrap().is_empty());
    assert_eq!(logical.position(), 0);
}

#[test]
fn test_buffered_store_is_read_once() {
    let image = patterned_image(600 * 1024);
    let (cursor, bytes_read) = CountingCursor::new(image.clone());
    let mut reader = RawPageReader::new(BufReader::with_capacity(1024 * 1024, cursor)).unwrap();

    let mut logical = MarkerSkippingReader::new(&mut reader);
    let mut output = Vec::new();
    logical.read_into(&mut output, 256 * 1024, 512).unwrap();

    assert_eq!(output, logical_bytes(&image, 0, 256 * 1024));
    let fetched = bytes_read.load(Ordering::Relaxed);
    assert!(fetched <= image.len() as u64,
            "{} bytes fetched from a {} byte store", fetched, image.len());
}
