//! Record parsing utilities for SQLite database format.

use bytes::Buf;
use tracing::trace;

use super::page::{Page, PageType};
use super::value::{Value, decode_value, encode_value, serial_type_len};
use crate::db::error::{DecodeError, Error, Result};
use crate::db::varint::{encode_varint, read_varint, varint_len};

/// One column of a decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub serial_type: u64,
    pub value: Value,
}

/// A decoded row from a leaf table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Total payload length, informational only.
    pub record_size: u64,
    pub rowid: i64,
    /// Length of the record header, counting the header-size varint.
    pub header_size: u64,
    pub columns: Vec<Column>,
}

impl Row {
    /// Get the number of columns in this record.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn value(&self, column_index: usize) -> Option<&Value> {
        self.columns.get(column_index).map(|c| &c.value)
    }

    /// Consume the row, keeping only the decoded values.
    pub fn into_values(self) -> Vec<Value> {
        self.columns.into_iter().map(|c| c.value).collect()
    }
}

/// Decode the row stored in the given cell of a page.
pub fn read_row(page: &Page, cell_index: usize) -> Result<Row> {
    let mut cell = page.cell_data(cell_index)?;
    let at_cell = |column: Option<usize>| {
        move |source: DecodeError| Error::Record {
            page: page.number,
            cell: cell_index,
            column,
            source,
        }
    };

    let (record_size, _) = read_varint(&mut cell).map_err(at_cell(None))?;
    let (rowid, _) = read_varint(&mut cell).map_err(at_cell(None))?;
    let (header_size, header_size_len) = read_varint(&mut cell).map_err(at_cell(None))?;

    let serial_bytes = header_size
        .checked_sub(header_size_len as u64)
        .ok_or(DecodeError::NegativeHeaderSize {
            header_size,
            varint_len: header_size_len,
        })
        .map_err(at_cell(None))?;
    if serial_bytes > cell.remaining() as u64 {
        return Err(at_cell(None)(DecodeError::HeaderOverrun {
            needed: serial_bytes,
            available: cell.remaining(),
        }));
    }

    // Serial types fill the rest of the header exactly; running out of
    // header bytes ends the list.
    let mut serial_types = Vec::new();
    {
        let mut header = (&mut cell).take(serial_bytes as usize);
        while header.has_remaining() {
            let (serial_type, _) = read_varint(&mut header).map_err(at_cell(None))?;
            serial_types.push(serial_type);
        }
    }

    let mut columns = Vec::with_capacity(serial_types.len());
    for (i, serial_type) in serial_types.into_iter().enumerate() {
        let expected = serial_type_len(serial_type).map_err(at_cell(Some(i)))?;
        let raw = cell.split_to(expected.min(cell.len()));
        let value = decode_value(serial_type, &raw).map_err(at_cell(Some(i)))?;
        columns.push(Column { serial_type, value });
    }

    trace!(page = page.number, cell = cell_index, rowid, columns = columns.len(), "decoded row");

    Ok(Row {
        record_size,
        rowid: rowid as i64,
        header_size,
        columns,
    })
}

/// Serialize a leaf table cell: payload size, rowid, record header, body.
///
/// The inverse of [`read_row`]. The header size counts its own varint, so
/// it is solved for when the serial types push it past one byte.
pub fn encode_cell(rowid: u64, values: &[Value]) -> Vec<u8> {
    let mut types = Vec::new();
    let mut body = Vec::new();
    for value in values {
        let (serial_type, payload) = encode_value(value);
        encode_varint(serial_type, &mut types);
        body.extend(payload);
    }

    let mut header_size = types.len() as u64 + 1;
    while types.len() as u64 + varint_len(header_size) as u64 != header_size {
        header_size = types.len() as u64 + varint_len(header_size) as u64;
    }

    let mut record = Vec::with_capacity(header_size as usize + body.len());
    encode_varint(header_size, &mut record);
    record.extend(types);
    record.extend(body);

    let mut cell = Vec::new();
    encode_varint(record.len() as u64, &mut cell);
    encode_varint(rowid, &mut cell);
    cell.extend(record);
    cell
}

/// Decode every cell of a page, in cell pointer order.
///
/// Fails on the first undecodable cell; no partial result is returned.
pub fn read_all_rows(page: &Page) -> Result<Vec<Row>> {
    (0..page.cell_count()).map(|i| read_row(page, i)).collect()
}

/// Like [`read_all_rows`], but only for leaf table pages.
pub fn scan_leaf_table(page: &Page) -> Result<Vec<Row>> {
    if page.page_type != PageType::LeafTable {
        return Err(Error::NotALeafTablePage {
            page: page.number,
            page_type: page.page_type,
        });
    }
    read_all_rows(page)
}
