//! Narrow SQL front end: a tokenizer and a recognizer for single-table
//! SELECT queries.

mod select;
mod tokenizer;

pub use select::{Filter, Literal, Projection, SelectStatement, parse_select};
pub use tokenizer::{LexError, Token, tokenize};
