//! Schema parsing for SQLite databases.

mod catalog;
mod table;

pub use catalog::{SchemaEntry, find_table, read_schema, root_page_of, table_names};
pub use table::{ColumnDef, TableSchema};
