//! SQLite database file parsing.

mod constants;
mod database;
mod engine;
mod error;
mod header;
#[cfg(test)]
mod testing;

pub mod page;
pub mod schema;
pub mod sql;
pub mod varint;

// Re-export public API
pub use database::Database;
pub use engine::{DatabaseInfo, QueryOutput, describe_database, list_tables, row_count, run_query};
pub use error::{DecodeError, Error, ErrorKind, Result};
pub use header::DatabaseHeader;
