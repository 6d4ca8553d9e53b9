//! Error types for the database reader.

use thiserror::Error;

use super::page::PageType;

/// Failures while decoding the bytes of a single cell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("varint truncated after {read} bytes")]
    TruncatedVarint { read: usize },

    #[error("record header size {header_size} is smaller than its own varint ({varint_len} bytes)")]
    NegativeHeaderSize { header_size: u64, varint_len: usize },

    #[error("record header needs {needed} bytes but only {available} remain in the cell")]
    HeaderOverrun { needed: u64, available: usize },

    #[error("reserved serial type {0}")]
    ReservedSerialType(u64),

    #[error("serial type {serial_type} expects {expected} bytes, got {actual}")]
    PayloadLengthMismatch {
        serial_type: u64,
        expected: usize,
        actual: usize,
    },

    #[error("text column is not valid UTF-8")]
    InvalidUtf8,
}

/// Which part of the reader an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Schema,
    QueryShape,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("page {page}: read failed: {source}")]
    PageRead {
        page: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid database header: {reason}")]
    InvalidHeader { reason: &'static str },

    #[error("invalid page size {0}")]
    InvalidPageSize(u32),

    #[error("page numbers start at 1")]
    InvalidPageNumber,

    #[error("page {page}: unknown page type {type_byte}")]
    UnknownPageType { page: u32, type_byte: u8 },

    #[error("page {page}: header truncated")]
    TruncatedHeader { page: u32 },

    #[error("page {page}: cell pointer array truncated ({cell_count} cells)")]
    TruncatedCellPointerArray { page: u32, cell_count: u16 },

    #[error("page {page}: cell index {index} out of range ({cell_count} cells)")]
    CellIndexOutOfRange {
        page: u32,
        index: usize,
        cell_count: u16,
    },

    #[error("page {page}: cell {cell} offset {offset} exceeds page data")]
    CellOffsetOutOfRange { page: u32, cell: usize, offset: u16 },

    #[error("page {page}: cell {cell}{}: {source}", .column.map(|c| format!(": column {c}")).unwrap_or_default())]
    Record {
        page: u32,
        cell: usize,
        column: Option<usize>,
        #[source]
        source: DecodeError,
    },

    #[error("page {page}: expected a leaf table page, found {page_type:?}")]
    NotALeafTablePage { page: u32, page_type: PageType },

    #[error("rowid {row_id}: {column} column missing in schema row")]
    SchemaColumnMissing { row_id: i64, column: &'static str },

    #[error("rowid {row_id}: {column} is not {expected}")]
    SchemaColumnTypeMismatch {
        row_id: i64,
        column: &'static str,
        expected: &'static str,
    },

    #[error("table '{table}': root page {value} is not a valid page number")]
    InvalidRootPage { table: String, value: i64 },

    #[error("table '{0}' not found in schema")]
    TableNotFound(String),

    #[error("column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    #[error("invalid CREATE TABLE statement for '{table}': {reason}")]
    InvalidTableDefinition { table: String, reason: String },

    #[error("select query missing FROM clause")]
    MissingFromClause,

    #[error("unsupported query: {0}")]
    UnsupportedQueryShape(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) | Error::PageRead { .. } => ErrorKind::Io,
            Error::InvalidHeader { .. }
            | Error::InvalidPageSize(_)
            | Error::InvalidPageNumber
            | Error::UnknownPageType { .. }
            | Error::TruncatedHeader { .. }
            | Error::TruncatedCellPointerArray { .. }
            | Error::CellIndexOutOfRange { .. }
            | Error::CellOffsetOutOfRange { .. }
            | Error::Record { .. }
            | Error::NotALeafTablePage { .. } => ErrorKind::Format,
            Error::SchemaColumnMissing { .. }
            | Error::SchemaColumnTypeMismatch { .. }
            | Error::InvalidRootPage { .. }
            | Error::TableNotFound(_)
            | Error::ColumnNotFound { .. }
            | Error::InvalidTableDefinition { .. } => ErrorKind::Schema,
            Error::MissingFromClause | Error::UnsupportedQueryShape(_) => ErrorKind::QueryShape,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
