//! Directory presentation utilities
//!
//! Helpers for rendering raw fields and the decoded directory table as text.

use crate::nand::types::DirectoryTable;

/// Column headers of the directory listing
pub const TABLE_HEADERS: [&str; 4] = ["file_name", "ext_attr_1", "file_len", "offset"];

/// Formats raw bytes as `0x`-prefixed uppercase hex
pub fn to_hex_string(bytes: &[u8]) -> String {
    let digits: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
    format!("0x{}", digits)
}

/// Renders the directory table as aligned plain-text columns
///
/// Text columns are left-aligned, the length column is right-aligned, and a
/// dashed rule separates the header from the rows.
pub fn format_directory_table(table: &DirectoryTable) -> String {
    let rows: Vec<[String; 4]> = table
        .iter()
        .map(|entry| {
            [
                entry.filename.escape_default().to_string(),
                entry.ext_attr1_hex(),
                entry.file_length.to_string(),
                entry.data_offset_hex(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS.map(String::from), &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = format!(
        "{:<w0$}  {:<w1$}  {:>w2$}  {:<w3$}",
        cells[0], cells[1], cells[2], cells[3],
        w0 = widths[0], w1 = widths[1], w2 = widths[2], w3 = widths[3]
    );
    out.push_str(line.trim_end());
    out.push('\n');
}
