use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::{Command, Config};

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_args(std::env::args())?;
    match &config.command {
        Command::DbInfo => commands::dbinfo(&config.db_path)?,
        Command::Tables => commands::tables(&config.db_path)?,
        Command::Query(sql) => commands::query(&config.db_path, sql)?,
    }

    Ok(())
}
