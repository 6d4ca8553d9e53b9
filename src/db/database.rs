//! Database file abstraction for SQLite.

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use super::constants::DB_HEADER_SIZE;
use super::error::{Error, Result};
use super::header::DatabaseHeader;
use super::page::Page;

/// A SQLite database file handle.
///
/// Each query opens its own handle; pages are read on demand and never
/// cached.
pub struct Database {
    file: File,
    header: DatabaseHeader,
}

impl Database {
    /// Open a SQLite database file and read its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        let mut bytes = [0u8; DB_HEADER_SIZE];
        file.read_exact(&mut bytes)?;
        let header = DatabaseHeader::parse(&bytes)?;

        debug!(path = %path.display(), page_size = header.page_size, "opened database");
        Ok(Self { file, header })
    }

    pub fn header(&self) -> &DatabaseHeader {
        &self.header
    }

    pub fn page_size(&self) -> u32 {
        self.header.page_size
    }

    /// Read a page from the database (1-indexed).
    ///
    /// The whole page must be present in the file; a short read fails.
    pub fn read_page(&mut self, page_num: u32) -> Result<Page> {
        let (start, size) = self.header.page_bounds(page_num)?;
        let mut data = vec![0u8; size];
        self.file
            .seek(std::io::SeekFrom::Start(start))
            .and_then(|_| self.file.read_exact(&mut data))
            .map_err(|source| Error::PageRead {
                page: page_num,
                source,
            })?;

        let page = Page::parse(page_num, Bytes::from(data))?;
        debug!(
            page = page_num,
            page_type = ?page.page_type,
            cells = page.cell_count,
            "read page"
        );
        Ok(page)
    }
}
