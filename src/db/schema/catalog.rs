//! SQLite schema table parsing.
//!
//! The schema table lives on page 1 and holds one row per table, index,
//! view and trigger, with the fixed column layout
//! `type, name, tbl_name, rootpage, sql`.

use tracing::debug;

use crate::db::constants::{
    SCHEMA_NAME_COLUMN, SCHEMA_ROOTPAGE_COLUMN, SCHEMA_SQL_COLUMN, SCHEMA_TBL_NAME_COLUMN,
    SCHEMA_TYPE_COLUMN,
};
use crate::db::error::{Error, Result};
use crate::db::page::{Page, Row, Value, read_all_rows};

/// An entry from the sqlite_schema table.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub entry_type: String,
    pub name: String,
    pub tbl_name: String,
    pub root_page: u32,
    /// NULL for indexes SQLite creates on its own.
    pub sql: Option<String>,
}

impl SchemaEntry {
    /// Parse a schema entry from a record.
    pub fn from_row(row: &Row) -> Result<Self> {
        let tbl_name = text_column(row, SCHEMA_TBL_NAME_COLUMN, "tbl_name")?.to_owned();
        let root_page = root_page_column(row, &tbl_name)?;
        let sql = match column(row, SCHEMA_SQL_COLUMN, "sql")? {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            _ => return Err(mismatch(row, "sql", "text")),
        };

        Ok(Self {
            entry_type: text_column(row, SCHEMA_TYPE_COLUMN, "type")?.to_owned(),
            name: text_column(row, SCHEMA_NAME_COLUMN, "name")?.to_owned(),
            tbl_name,
            root_page,
            sql,
        })
    }

    pub fn is_table(&self) -> bool {
        self.entry_type == "table"
    }
}

fn column<'a>(row: &'a Row, index: usize, name: &'static str) -> Result<&'a Value> {
    row.value(index).ok_or(Error::SchemaColumnMissing {
        row_id: row.rowid,
        column: name,
    })
}

fn mismatch(row: &Row, column: &'static str, expected: &'static str) -> Error {
    Error::SchemaColumnTypeMismatch {
        row_id: row.rowid,
        column,
        expected,
    }
}

fn text_column<'a>(row: &'a Row, index: usize, name: &'static str) -> Result<&'a str> {
    column(row, index, name)?
        .as_text()
        .ok_or_else(|| mismatch(row, name, "text"))
}

fn root_page_column(row: &Row, table: &str) -> Result<u32> {
    let value = column(row, SCHEMA_ROOTPAGE_COLUMN, "rootpage")?
        .as_integer()
        .ok_or_else(|| mismatch(row, "rootpage", "an integer"))?;
    u32::try_from(value).map_err(|_| Error::InvalidRootPage {
        table: table.to_owned(),
        value,
    })
}

/// The `tbl_name` of every row in the schema table, in cell order.
pub fn table_names(schema_page: &Page) -> Result<Vec<String>> {
    read_all_rows(schema_page)?
        .iter()
        .map(|row| text_column(row, SCHEMA_TBL_NAME_COLUMN, "tbl_name").map(str::to_owned))
        .collect()
}

/// Root page of the named table.
///
/// Only rows of type `table` are considered, so an index on the table
/// never shadows it.
pub fn root_page_of(table_name: &str, schema_page: &Page) -> Result<u32> {
    for row in read_all_rows(schema_page)? {
        let tbl_name = text_column(&row, SCHEMA_TBL_NAME_COLUMN, "tbl_name")?;
        if !tbl_name.eq_ignore_ascii_case(table_name) {
            continue;
        }
        if text_column(&row, SCHEMA_TYPE_COLUMN, "type")? != "table" {
            continue;
        }
        let root_page = root_page_column(&row, tbl_name)?;
        debug!(table = table_name, root_page, "resolved root page");
        return Ok(root_page);
    }
    Err(Error::TableNotFound(table_name.to_owned()))
}

/// Read all schema entries from the schema page.
pub fn read_schema(schema_page: &Page) -> Result<Vec<SchemaEntry>> {
    read_all_rows(schema_page)?
        .iter()
        .map(SchemaEntry::from_row)
        .collect()
}

/// Find a table's schema entry by name.
pub fn find_table(table_name: &str, schema_page: &Page) -> Result<SchemaEntry> {
    read_schema(schema_page)?
        .into_iter()
        .find(|e| e.is_table() && e.tbl_name.eq_ignore_ascii_case(table_name))
        .ok_or_else(|| Error::TableNotFound(table_name.to_owned()))
}
