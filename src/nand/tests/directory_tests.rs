//! Tests for the directory table parser

use std::io::BufReader;
use std::sync::atomic::Ordering;

use super::test_utils::{blank_image, encode_record, place, reader_for, CountingCursor};
use crate::io::page_reader::RawPageReader;
use crate::nand::constants::directory::FS_ROOT_DIR_START;
use crate::nand::constants::layout::{BLOCK_SZ, MARKER_PERIOD, PAGE_SZ};
use crate::nand::constants::record::RECORD_SZ;
use crate::nand::directory::{DirectoryTableParser, TableEnd};
use crate::nand::entry::DirectoryEntry;
use crate::nand::types::DirectoryTable;

const IMAGE_SIZE: usize = (12 * BLOCK_SZ) as usize;

fn dir_start() -> usize {
    FS_ROOT_DIR_START as usize
}

#[test]
fn test_directory_start_offset() {
    assert_eq!(FS_ROOT_DIR_START, 0x8420);
    // The table starts 32 bytes into a page, leaving room for 15 records
    assert_eq!(FS_ROOT_DIR_START % MARKER_PERIOD, 0x20);
}

#[test]
fn test_parse_records_without_markers() {
    let mut image = blank_image(IMAGE_SIZE);
    place(&mut image, dir_start(), &encode_record(b"BOOT.BIN", [0x01, 0x02, 0x03], 0x1234, 0x0090));
    place(&mut image, dir_start() + RECORD_SZ, &encode_record(b"CONFIG", [0xA0, 0x00, 0xFF], 17, 0x00A0));
    place(&mut image, dir_start() + 2 * RECORD_SZ, &encode_record(b"LOG.TXT", [0, 0, 0], 0, 0x00B0));

    let mut reader = reader_for(image);
    let table = DirectoryTable::read(&mut reader).unwrap();

    assert_eq!(table.offset, FS_ROOT_DIR_START);
    assert_eq!(table.resyncs, 0);
    assert_eq!(table.entries, vec![
        DirectoryEntry::new("BOOT.BIN".to_string(), [0x01, 0x02, 0x03], 0x1234, [0x00, 0x90]),
        DirectoryEntry::new("CONFIG".to_string(), [0xA0, 0x00, 0xFF], 17, [0x00, 0xA0]),
        DirectoryEntry::new("LOG.TXT".to_string(), [0, 0, 0], 0, [0x00, 0xB0]),
    ]);
    assert_eq!(table.entries[0].ext_attr1_hex(), "0x010203");
    assert_eq!(table.entries[1].data_offset_hex(), "0x00A0");
}

#[test]
fn test_empty_filename_ends_table() {
    let mut image = blank_image(IMAGE_SIZE);
    place(&mut image, dir_start(), &encode_record(b"ONE", [0, 0, 0], 1, 0x0090));
    // Zero record, then a record that must not be reached
    place(&mut image, dir_start() + 2 * RECORD_SZ, &encode_record(b"HIDDEN", [0, 0, 0], 1, 0x0090));

    let mut reader = reader_for(image);
    let mut parser = DirectoryTableParser::new(&mut reader);

    assert_eq!(parser.next().unwrap().unwrap().filename, "ONE");
    assert!(parser.next().is_none());
    assert_eq!(parser.end_reason(), Some(TableEnd::EmptyFilename));
    assert_eq!(parser.cursor().records, 1);
}

#[test]
fn test_parser_is_not_restartable() {
    let mut image = blank_image(IMAGE_SIZE);
    place(&mut image, dir_start(), &encode_record(b"ONE", [0, 0, 0], 1, 0x0090));

    let mut reader = reader_for(image);
    let mut parser = DirectoryTableParser::new(&mut reader);

    assert!(parser.next().is_some());
    assert!(parser.next().is_none());
    assert!(parser.next().is_none());
}

#[test]
fn test_undecodable_filename_ends_table() {
    let mut image = blank_image(IMAGE_SIZE);
    place(&mut image, dir_start(), &encode_record(b"GOOD", [0, 0, 0], 1, 0x0090));
    place(&mut image, dir_start() + RECORD_SZ, &encode_record(b"\xFF\xFE", [0, 0, 0], 1, 0x0090));

    let mut reader = reader_for(image);
    let mut parser = DirectoryTableParser::new(&mut reader);
    let entries: Vec<_> = parser.by_ref().map(|e| e.unwrap().filename).collect();

    assert_eq!(entries, vec!["GOOD".to_string()]);
    assert_eq!(parser.end_reason(), Some(TableEnd::UndecodableFilename));
}

#[test]
fn test_end_of_image_ends_table() {
    let mut image = blank_image(dir_start() + RECORD_SZ + 10);
    place(&mut image, dir_start(), &encode_record(b"LAST", [0, 0, 0], 8, 0x0090));
    image[dir_start() + RECORD_SZ..].fill(b'X');

    let mut reader = reader_for(image);
    let mut parser = DirectoryTableParser::new(&mut reader);
    let entries: Vec<_> = parser.by_ref().map(|e| e.unwrap().filename).collect();

    assert_eq!(entries, vec!["LAST".to_string()]);
    assert_eq!(parser.end_reason(), Some(TableEnd::EndOfImage));
}

#[test]
fn test_directory_beyond_image_is_empty() {
    let mut reader = reader_for(blank_image(1024));
    let table = DirectoryTable::read(&mut reader).unwrap();

    assert!(table.is_empty());
}

#[test]
fn test_directory_spanning_marker_run() {
    let mut image = blank_image(IMAGE_SIZE);
    let records_in_first_page = (PAGE_SZ as usize - 0x20) / RECORD_SZ;
    assert_eq!(records_in_first_page, 15);

    for i in 0..records_in_first_page {
        let name = format!("FILE{:02}", i);
        place(&mut image, dir_start() + i * RECORD_SZ, &encode_record(name.as_bytes(), [0, 0, 0], i as u32, 0x0090));
    }
    // First record of the next page, right after the marker run
    let next_page = dir_start() - 0x20 + MARKER_PERIOD as usize;
    place(&mut image, next_page, &encode_record(b"FILE15", [0, 0, 0], 15, 0x0090));

    let mut reader = reader_for(image);
    let table = DirectoryTable::read(&mut reader).unwrap();

    assert_eq!(table.len(), 16);
    assert_eq!(table.resyncs, 1);
    for (i, entry) in table.iter().enumerate() {
        assert_eq!(entry.filename, format!("FILE{:02}", i));
        assert_eq!(entry.file_length, i as u32);
    }
}

#[test]
fn test_record_straddling_marker_is_abandoned() {
    // Record A starts 22 bytes before the marker run at 512: its name,
    // attribute and length fit, but the spacer runs into the marker and the
    // offset field read is refused. Decoding restarts at 528 with record B
    // and A is lost.
    let mut image = blank_image(2048);
    place(&mut image, 490, &encode_record(b"LOST", [0, 0, 0], 1, 0x0090)[..22]);
    place(&mut image, 528, &encode_record(b"FOUND", [0, 0, 0], 2, 0x00A0));

    let mut reader = reader_for(image);
    let mut parser = DirectoryTableParser::with_offset(&mut reader, 490);
    let entries: Vec<DirectoryEntry> = parser.by_ref().map(|e| e.unwrap()).collect();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].filename, "FOUND");
    assert_eq!(entries[0].file_length, 2);
    assert_eq!(parser.cursor().resyncs, 1);
    assert_eq!(parser.end_reason(), Some(TableEnd::EmptyFilename));
}

#[test]
fn test_record_after_marker_is_decoded_from_marker_end() {
    // The post-marker bytes are decoded as a record whatever they are
    let mut image = blank_image(2048);
    place(&mut image, 500, b"PARTIALNAME");
    place(&mut image, 528, &encode_record(b"NEXT", [0x11, 0x22, 0x33], 3, 0x0010));

    let mut reader = reader_for(image);
    let table = DirectoryTable::read_at(&mut reader, 500).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.entries[0].filename, "NEXT");
    assert_eq!(table.entries[0].ext_attr1, [0x11, 0x22, 0x33]);
    assert_eq!(table.resyncs, 1);
}

#[test]
fn test_directory_read_does_not_refetch_buffer() {
    let mut image = blank_image(IMAGE_SIZE);
    for i in 0..40 {
        let name = format!("F{:02}", i);
        // 15 records fill the first page, later pages hold 16 from their start
        let offset = if i < 15 {
            dir_start() + i * RECORD_SZ
        } else {
            let j = i - 15;
            let second_page = dir_start() - 0x20 + MARKER_PERIOD as usize;
            second_page + (j / 16) * MARKER_PERIOD as usize + (j % 16) * RECORD_SZ
        };
        place(&mut image, offset, &encode_record(name.as_bytes(), [0, 0, 0], i as u32, 0x0090));
    }

    let (cursor, bytes_read) = CountingCursor::new(image.clone());
    let mut reader = RawPageReader::new(BufReader::with_capacity(1024 * 1024, cursor)).unwrap();
    let table = DirectoryTable::read(&mut reader).unwrap();

    assert_eq!(table.len(), 40);
    assert_eq!(table.resyncs, 2);
    let fetched = bytes_read.load(Ordering::Relaxed);
    assert!(fetched <= image.len() as u64,
            "{} bytes fetched from a {} byte store", fetched, image.len());
}
