//! Builds small database files on disk for end-to-end tests.

#![allow(dead_code)]

use std::io::Write;

use sqlite_reader::db::page::{Value, encode_cell};
use sqlite_reader::db::varint::encode_varint;
use tempfile::NamedTempFile;

pub const PAGE_SIZE: usize = 4096;

pub const APPLES_SQL: &str =
    "CREATE TABLE apples\n(\n\tid integer primary key autoincrement,\n\tname text,\n\tcolor text\n)";

pub const APPLES: [(&str, &str); 4] = [
    ("Granny Smith", "Light Green"),
    ("Fuji", "Red"),
    ("Honeycrisp", "Blush Red"),
    ("Golden Delicious", "Yellow"),
];

/// Lay out a B-tree page: header at `base`, cells packed at the end.
fn btree_page(page_type: u8, base: usize, cells: &[Vec<u8>], right_pointer: Option<u32>) -> Vec<u8> {
    let mut data = vec![0u8; PAGE_SIZE];
    data[base] = page_type;
    data[base + 3..base + 5].copy_from_slice(&(cells.len() as u16).to_be_bytes());
    let header_len = match right_pointer {
        Some(pointer) => {
            data[base + 8..base + 12].copy_from_slice(&pointer.to_be_bytes());
            12
        }
        None => 8,
    };
    let mut end = PAGE_SIZE;
    for (i, cell) in cells.iter().enumerate() {
        let start = end - cell.len();
        data[start..end].copy_from_slice(cell);
        let slot = base + header_len + i * 2;
        data[slot..slot + 2].copy_from_slice(&(start as u16).to_be_bytes());
        end = start;
    }
    data
}

pub fn schema_page(entries: &[(&str, &str, i64, &str)]) -> Vec<u8> {
    let rows: Vec<_> = entries
        .iter()
        .map(|&(kind, name, root, sql)| (kind, name, name, root, sql))
        .collect();
    schema_page_rows(&rows)
}

/// Page 1 from full `(type, name, tbl_name, rootpage, sql)` rows.
pub fn schema_page_rows(rows: &[(&str, &str, &str, i64, &str)]) -> Vec<u8> {
    let cells: Vec<_> = rows
        .iter()
        .enumerate()
        .map(|(i, (kind, name, tbl_name, root, sql))| {
            encode_cell(
                i as u64 + 1,
                &[
                    Value::Text(kind.to_string()),
                    Value::Text(name.to_string()),
                    Value::Text(tbl_name.to_string()),
                    Value::Integer(*root),
                    Value::Text(sql.to_string()),
                ],
            )
        })
        .collect();
    let mut page = btree_page(13, 100, &cells, None);
    page[..16].copy_from_slice(b"SQLite format 3\0");
    page[16..18].copy_from_slice(&(PAGE_SIZE as u16).to_be_bytes());
    page
}

pub fn leaf_table_page(cells: &[Vec<u8>]) -> Vec<u8> {
    btree_page(13, 0, cells, None)
}

/// An interior table page whose cells are (left child, key) pairs.
pub fn interior_table_page(children: &[(u32, u64)], right_pointer: u32) -> Vec<u8> {
    let cells: Vec<_> = children
        .iter()
        .map(|(child, key)| {
            let mut cell = child.to_be_bytes().to_vec();
            encode_varint(*key, &mut cell);
            cell
        })
        .collect();
    btree_page(5, 0, &cells, Some(right_pointer))
}

pub fn apple_rows() -> Vec<Vec<u8>> {
    APPLES
        .iter()
        .enumerate()
        .map(|(i, (name, color))| {
            encode_cell(
                i as u64 + 1,
                &[
                    Value::Null,
                    Value::Text(name.to_string()),
                    Value::Text(color.to_string()),
                ],
            )
        })
        .collect()
}

pub fn write_pages(pages: &[Vec<u8>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    let mut pages = pages.to_vec();
    let page_count = pages.len() as u32;
    pages[0][28..32].copy_from_slice(&page_count.to_be_bytes());
    for page in &pages {
        file.write_all(page).expect("write page");
    }
    file.flush().expect("flush");
    file
}

/// The four-row `apples` database.
pub fn apples_db() -> NamedTempFile {
    write_pages(&[
        schema_page(&[("table", "apples", 2, APPLES_SQL)]),
        leaf_table_page(&apple_rows()),
    ])
}
