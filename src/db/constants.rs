//! Constants used throughout the SQLite database parsing.

/// Size of the database header (on page 1).
pub const DB_HEADER_SIZE: usize = 100;

/// Magic string every SQLite 3 database starts with.
pub const DB_MAGIC: &[u8; 16] = b"SQLite format 3\0";

/// Offset of page size in database header.
pub const PAGE_SIZE_OFFSET: usize = 16;

/// Offset of the in-header database size (in pages).
pub const PAGE_COUNT_OFFSET: usize = 28;

/// Smallest and largest page sizes SQLite accepts.
pub const MIN_PAGE_SIZE: u32 = 512;
pub const MAX_PAGE_SIZE: u32 = 65536;

/// Offset of the B-tree page header on page 1.
pub const PAGE1_HEADER_OFFSET: usize = 100;

/// Offset of cell count in page header (relative to the type byte).
pub const CELL_COUNT_OFFSET: usize = 3;

/// Offset of the right-most pointer in an interior page header.
pub const RIGHT_POINTER_OFFSET: usize = 8;

/// B-tree page header lengths, including the type byte.
pub const LEAF_PAGE_HEADER_SIZE: usize = 8;
pub const INTERIOR_PAGE_HEADER_SIZE: usize = 12;

/// Column indices in the sqlite_schema table.
pub const SCHEMA_TYPE_COLUMN: usize = 0;
pub const SCHEMA_NAME_COLUMN: usize = 1;
pub const SCHEMA_TBL_NAME_COLUMN: usize = 2;
pub const SCHEMA_ROOTPAGE_COLUMN: usize = 3;
pub const SCHEMA_SQL_COLUMN: usize = 4;
