use anyhow::{Context, Result};
use sqlite_reader::db::{self, QueryOutput};

pub fn dbinfo(path: &str) -> Result<()> {
    let info = db::describe_database(path).context("Failed to read database info")?;
    println!("database page size: {}", info.page_size);
    println!("number of tables: {}", info.table_count);
    Ok(())
}

pub fn tables(path: &str) -> Result<()> {
    let table_names = db::list_tables(path).context("Failed to read table names")?;
    println!("{}", table_names.join(" "));
    Ok(())
}

pub fn query(path: &str, sql: &str) -> Result<()> {
    let output = db::run_query(path, sql).with_context(|| format!("Failed to run query: {sql}"))?;
    match output {
        QueryOutput::Count(count) => println!("{}", count),
        QueryOutput::Rows(rows) => {
            for row in rows {
                let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                println!("{}", fields.join("|"));
            }
        }
    }
    Ok(())
}
