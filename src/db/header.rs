//! Database header parsing for SQLite format.

use super::constants::{
    DB_HEADER_SIZE, DB_MAGIC, MAX_PAGE_SIZE, MIN_PAGE_SIZE, PAGE_COUNT_OFFSET, PAGE_SIZE_OFFSET,
};
use super::error::{Error, Result};

/// The fixed 100-byte prefix of every database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseHeader {
    /// Page size in bytes, already resolved from the on-disk encoding.
    pub page_size: u32,
    /// Database size in pages, as recorded in the header.
    pub page_count: u32,
}

impl DatabaseHeader {
    /// Parse the database header.
    ///
    /// The page size is stored at byte offset 16-17 as a 2-byte big-endian
    /// integer, where the value 1 stands for 65536. It must be a power of
    /// two between 512 and 65536.
    pub fn parse(bytes: &[u8; DB_HEADER_SIZE]) -> Result<Self> {
        if &bytes[..DB_MAGIC.len()] != DB_MAGIC {
            return Err(Error::InvalidHeader {
                reason: "missing SQLite format 3 magic string",
            });
        }

        let raw = u16::from_be_bytes([bytes[PAGE_SIZE_OFFSET], bytes[PAGE_SIZE_OFFSET + 1]]);
        let page_size = if raw == 1 { MAX_PAGE_SIZE } else { raw as u32 };
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) || !page_size.is_power_of_two() {
            return Err(Error::InvalidPageSize(page_size));
        }

        let page_count = u32::from_be_bytes([
            bytes[PAGE_COUNT_OFFSET],
            bytes[PAGE_COUNT_OFFSET + 1],
            bytes[PAGE_COUNT_OFFSET + 2],
            bytes[PAGE_COUNT_OFFSET + 3],
        ]);

        Ok(Self {
            page_size,
            page_count,
        })
    }

    /// Byte range `(start, length)` of a page within the file.
    pub fn page_bounds(&self, page_num: u32) -> Result<(u64, usize)> {
        if page_num == 0 {
            return Err(Error::InvalidPageNumber);
        }
        let start = (page_num as u64 - 1) * self.page_size as u64;
        Ok((start, self.page_size as usize))
    }
}
