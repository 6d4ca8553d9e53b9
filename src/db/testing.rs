//! Builders for synthetic pages used by unit tests.

use super::constants::{DB_MAGIC, PAGE1_HEADER_OFFSET, PAGE_SIZE_OFFSET};
use super::page::{PageType, Value};

pub use super::page::encode_cell;

/// A leaf table page with the cells packed at its end, pointers in order.
///
/// Page 1 also gets a database header in its first 100 bytes.
pub fn leaf_table_page(number: u32, page_size: usize, cells: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0u8; page_size];
    let base = if number == 1 {
        data[..16].copy_from_slice(DB_MAGIC);
        let raw = if page_size == 65536 { 1 } else { page_size as u16 };
        data[PAGE_SIZE_OFFSET..PAGE_SIZE_OFFSET + 2].copy_from_slice(&raw.to_be_bytes());
        PAGE1_HEADER_OFFSET
    } else {
        0
    };

    data[base] = PageType::LeafTable as u8;
    data[base + 3..base + 5].copy_from_slice(&(cells.len() as u16).to_be_bytes());
    let mut end = page_size;
    for (i, cell) in cells.iter().enumerate() {
        let start = end - cell.len();
        data[start..end].copy_from_slice(cell);
        let slot = base + 8 + i * 2;
        data[slot..slot + 2].copy_from_slice(&(start as u16).to_be_bytes());
        end = start;
    }
    data
}

/// Values of one sqlite_schema row.
pub fn schema_row(entry_type: &str, name: &str, root_page: i64, sql: &str) -> Vec<Value> {
    vec![
        Value::Text(entry_type.into()),
        Value::Text(name.into()),
        Value::Text(name.into()),
        Value::Integer(root_page),
        Value::Text(sql.into()),
    ]
}
