//! Read-only decoder for SQLite database files.
//!
//! [`db`] turns page bytes into typed rows and answers a few catalog and
//! single-table queries on top of that.

pub mod db;
