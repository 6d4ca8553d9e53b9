//! Page and record parsing for SQLite database format.

mod page;
mod record;
mod value;

pub use page::{Page, PageType};
pub use record::{Column, Row, encode_cell, read_all_rows, read_row, scan_leaf_table};
pub use value::{Value, decode_value, encode_value, serial_type_len};
