//! Entry points used by the command line: describe the database, list its
//! tables and answer single-table queries.
//!
//! Every call opens the file afresh, reads the pages it needs and drops the
//! handle before returning.

use std::path::Path;

use tracing::{debug, warn};

use super::database::Database;
use super::error::{Error, Result};
use super::page::{Page, Row, Value, scan_leaf_table};
use super::schema::{self, TableSchema};
use super::sql::{Projection, SelectStatement, parse_select};

/// Answer to the `.dbinfo` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub page_size: u32,
    /// Number of schema table rows (cells on page 1).
    pub table_count: u16,
}

/// Result of running a query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Count(u64),
    Rows(Vec<Vec<Value>>),
}

fn open_with_schema(path: &Path) -> Result<(Database, Page)> {
    let mut db = Database::open(path)?;
    let schema_page = db.read_page(1)?;
    Ok((db, schema_page))
}

/// Read the page size and the number of schema entries.
pub fn describe_database<P: AsRef<Path>>(path: P) -> Result<DatabaseInfo> {
    let (db, schema_page) = open_with_schema(path.as_ref())?;
    Ok(DatabaseInfo {
        page_size: db.page_size(),
        table_count: schema_page.cell_count,
    })
}

/// The `tbl_name` of every schema row, in schema order.
pub fn list_tables<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let (_, schema_page) = open_with_schema(path.as_ref())?;
    schema::table_names(&schema_page)
}

/// Count the rows of a table as the cell count of its root page.
///
/// A table whose B-tree has grown past one page has an interior root page;
/// its cell count undercounts the rows.
pub fn row_count<P: AsRef<Path>>(path: P, table_name: &str) -> Result<u16> {
    let (mut db, schema_page) = open_with_schema(path.as_ref())?;
    let root_page = schema::root_page_of(table_name, &schema_page)?;
    let page = db.read_page(root_page)?;
    if page.page_type.is_interior() {
        warn!(
            table = table_name,
            page = root_page,
            "root page is interior; row count covers only its own cells"
        );
    }
    Ok(page.cell_count)
}

/// Parse and run a query from the supported subset.
pub fn run_query<P: AsRef<Path>>(path: P, sql: &str) -> Result<QueryOutput> {
    let statement = parse_select(sql)?;
    debug!(?statement, "parsed query");
    execute(path.as_ref(), &statement)
}

fn execute(path: &Path, statement: &SelectStatement) -> Result<QueryOutput> {
    if statement.projection == Projection::CountStar && statement.filter.is_none() {
        return row_count(path, &statement.table).map(|n| QueryOutput::Count(n.into()));
    }

    let (mut db, schema_page) = open_with_schema(path)?;
    let entry = schema::find_table(&statement.table, &schema_page)?;
    let sql = entry.sql.as_deref().ok_or_else(|| Error::InvalidTableDefinition {
        table: entry.tbl_name.clone(),
        reason: "no CREATE TABLE text".into(),
    })?;
    let table = TableSchema::parse(&entry.tbl_name, sql)?;

    let resolve = |column: &str| {
        table.index_of(column).ok_or_else(|| Error::ColumnNotFound {
            table: table.name.clone(),
            column: column.to_owned(),
        })
    };
    let filter = statement
        .filter
        .as_ref()
        .map(|f| resolve(f.column.as_str()).map(|index| (index, &f.value)))
        .transpose()?;
    let projection = match &statement.projection {
        Projection::CountStar => None,
        Projection::AllColumns => Some((0..table.columns.len()).collect::<Vec<_>>()),
        Projection::Columns(names) => Some(
            names
                .iter()
                .map(|name| resolve(name.as_str()))
                .collect::<Result<Vec<_>>>()?,
        ),
    };

    let page = db.read_page(entry.root_page)?;
    let rows = scan_leaf_table(&page)?;
    let matching = rows.iter().filter(|row| match filter {
        Some((index, literal)) => literal.matches(&column_value(row, &table, index)),
        None => true,
    });

    match projection {
        None => Ok(QueryOutput::Count(matching.count() as u64)),
        Some(indices) => Ok(QueryOutput::Rows(
            matching
                .map(|row| indices.iter().map(|&i| column_value(row, &table, i)).collect())
                .collect(),
        )),
    }
}

/// A column's value, reading the rowid for an INTEGER PRIMARY KEY column
/// and NULL for columns added after the row was written.
fn column_value(row: &Row, table: &TableSchema, index: usize) -> Value {
    if table.rowid_alias == Some(index) {
        return Value::Integer(row.rowid);
    }
    row.value(index).cloned().unwrap_or(Value::Null)
}
