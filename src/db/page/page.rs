//! Page parsing utilities for SQLite database format.

use bytes::Bytes;

use crate::db::constants::{
    CELL_COUNT_OFFSET, INTERIOR_PAGE_HEADER_SIZE, LEAF_PAGE_HEADER_SIZE, PAGE1_HEADER_OFFSET,
    RIGHT_POINTER_OFFSET,
};
use crate::db::error::{Error, Result};

/// B-tree page kinds, keyed by their on-disk type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    InteriorIndex = 2,
    InteriorTable = 5,
    LeafIndex = 10,
    LeafTable = 13,
}

impl PageType {
    fn from_byte(value: u8) -> Option<Self> {
        match value {
            2 => Some(Self::InteriorIndex),
            5 => Some(Self::InteriorTable),
            10 => Some(Self::LeafIndex),
            13 => Some(Self::LeafTable),
            _ => None,
        }
    }

    pub fn is_interior(self) -> bool {
        matches!(self, Self::InteriorIndex | Self::InteriorTable)
    }

    /// Length of the B-tree page header, type byte included.
    pub fn header_len(self) -> usize {
        if self.is_interior() {
            INTERIOR_PAGE_HEADER_SIZE
        } else {
            LEAF_PAGE_HEADER_SIZE
        }
    }
}

/// A SQLite database page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: u32,
    pub page_type: PageType,
    /// Byte offset of the page within the file.
    pub start_offset: u64,
    /// Where the B-tree header begins within `data`.
    pub content_offset: usize,
    pub cell_count: u16,
    /// Offsets from the start of the page, in on-disk array order.
    pub cell_pointers: Vec<u16>,
    pub right_most_pointer: Option<u32>,
    data: Bytes,
}

impl Page {
    /// Parse a page from its raw bytes.
    ///
    /// Page 1 carries the database header in its first 100 bytes, so its
    /// B-tree header starts at offset 100; every other page starts at 0.
    pub fn parse(number: u32, data: Bytes) -> Result<Self> {
        if number == 0 {
            return Err(Error::InvalidPageNumber);
        }
        let content_offset = if number == 1 { PAGE1_HEADER_OFFSET } else { 0 };
        let start_offset = (number as u64 - 1) * data.len() as u64;

        let Some(&type_byte) = data.get(content_offset) else {
            return Err(Error::TruncatedHeader { page: number });
        };
        let page_type = PageType::from_byte(type_byte).ok_or(Error::UnknownPageType {
            page: number,
            type_byte,
        })?;

        let header_end = content_offset + page_type.header_len();
        if data.len() < header_end {
            return Err(Error::TruncatedHeader { page: number });
        }
        let header = &data[content_offset..header_end];

        let cell_count = u16::from_be_bytes([header[CELL_COUNT_OFFSET], header[CELL_COUNT_OFFSET + 1]]);
        let right_most_pointer = page_type.is_interior().then(|| {
            u32::from_be_bytes([
                header[RIGHT_POINTER_OFFSET],
                header[RIGHT_POINTER_OFFSET + 1],
                header[RIGHT_POINTER_OFFSET + 2],
                header[RIGHT_POINTER_OFFSET + 3],
            ])
        });

        let pointers_end = header_end + cell_count as usize * 2;
        if data.len() < pointers_end {
            return Err(Error::TruncatedCellPointerArray {
                page: number,
                cell_count,
            });
        }
        let cell_pointers = data[header_end..pointers_end]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            number,
            page_type,
            start_offset,
            content_offset,
            cell_count,
            cell_pointers,
            right_most_pointer,
            data,
        })
    }

    /// Get the raw page data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Get the number of cells in this page.
    pub fn cell_count(&self) -> usize {
        self.cell_count as usize
    }

    /// Resolve a cell index to its byte offset within the page.
    pub fn cell_offset(&self, index: usize) -> Result<usize> {
        let pointer = self
            .cell_pointers
            .get(index)
            .copied()
            .ok_or(Error::CellIndexOutOfRange {
                page: self.number,
                index,
                cell_count: self.cell_count,
            })?;
        if pointer as usize >= self.data.len() {
            return Err(Error::CellOffsetOutOfRange {
                page: self.number,
                cell: index,
                offset: pointer,
            });
        }
        Ok(pointer as usize)
    }

    /// The bytes of a cell, from its offset to the end of the page.
    pub fn cell_data(&self, index: usize) -> Result<Bytes> {
        let offset = self.cell_offset(index)?;
        Ok(self.data.slice(offset..))
    }
}
