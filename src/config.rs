//! Command-line configuration.

use anyhow::{Result, bail};

/// What the user asked the tool to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    DbInfo,
    Tables,
    Query(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    pub command: Command,
}

impl Config {
    /// Parse `<program> <database path> <command>`.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let args = args.into_iter().collect::<Vec<_>>();
        match args.len() {
            0 | 1 => bail!("Missing <database path> and <command>"),
            2 => bail!("Missing <command>"),
            _ => {}
        }

        let command = match args[2].as_str() {
            ".dbinfo" => Command::DbInfo,
            ".tables" | ".table" => Command::Tables,
            dot if dot.starts_with('.') => bail!("Missing or invalid command passed: {}", dot),
            query if query.trim().is_empty() => bail!("Missing or invalid command passed: empty query"),
            _ => Command::Query(args[2..].join(" ").trim().to_owned()),
        };

        Ok(Self {
            db_path: args[1].clone(),
            command,
        })
    }
}
