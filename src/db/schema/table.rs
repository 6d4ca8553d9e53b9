//! Column layout of user tables, recovered from their CREATE TABLE text.

use crate::db::error::{Error, Result};
use crate::db::sql::{Token, tokenize};

/// Words that end the type name of a column definition.
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "CONSTRAINT", "PRIMARY", "NOT", "NULL", "UNIQUE", "CHECK", "DEFAULT", "COLLATE",
    "REFERENCES", "GENERATED", "AS",
];

/// Words that open a table-level constraint instead of a column.
const TABLE_CONSTRAINT_KEYWORDS: &[&str] = &["CONSTRAINT", "PRIMARY", "UNIQUE", "CHECK", "FOREIGN"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub declared_type: Option<String>,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    /// Index of the INTEGER PRIMARY KEY column, which aliases the rowid.
    pub rowid_alias: Option<usize>,
}

impl TableSchema {
    /// Parse a `CREATE TABLE` statement as stored in the schema table.
    pub fn parse(table: &str, create_sql: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidTableDefinition {
            table: table.to_owned(),
            reason,
        };

        let tokens = tokenize(create_sql).map_err(|e| invalid(e.to_string()))?;
        let open = tokens
            .iter()
            .position(|t| t.is_symbol('('))
            .ok_or_else(|| invalid("missing column list".into()))?;
        if !tokens[..open].iter().any(|t| t.is_keyword("TABLE")) {
            return Err(invalid("not a CREATE TABLE statement".into()));
        }

        let mut columns = Vec::new();
        let mut rowid_alias = None;
        let mut table_primary_key = None;
        for definition in split_definitions(&tokens[open + 1..]).map_err(invalid)? {
            let Some(first) = definition.first() else {
                return Err(invalid("empty column definition".into()));
            };

            if TABLE_CONSTRAINT_KEYWORDS.iter().any(|k| first.is_keyword(k)) {
                if let Some(name) = single_column_primary_key(definition) {
                    table_primary_key = Some(name);
                }
                continue;
            }

            let name = first
                .ident()
                .ok_or_else(|| invalid(format!("expected column name, found {first:?}")))?
                .to_owned();
            let declared_type = declared_type(&definition[1..]);
            let index = columns.len();
            if is_primary_key(definition) && is_integer(declared_type.as_deref()) {
                rowid_alias = Some(index);
            }
            columns.push(ColumnDef {
                name,
                declared_type,
                index,
            });
        }

        if rowid_alias.is_none() {
            rowid_alias = table_primary_key.and_then(|pk| {
                columns
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(&pk))
                    .filter(|c| is_integer(c.declared_type.as_deref()))
                    .map(|c| c.index)
            });
        }

        if columns.is_empty() {
            return Err(invalid("no columns".into()));
        }
        Ok(Self {
            name: table.to_owned(),
            columns,
            rowid_alias,
        })
    }

    /// Position of a column, matched case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Split the tokens after the opening parenthesis into comma-separated
/// definitions, stopping at the matching closing parenthesis.
fn split_definitions(tokens: &[Token]) -> std::result::Result<Vec<&[Token]>, String> {
    let mut definitions = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_symbol('(') {
            depth += 1;
        } else if token.is_symbol(')') {
            if depth == 0 {
                definitions.push(&tokens[start..i]);
                return Ok(definitions);
            }
            depth -= 1;
        } else if token.is_symbol(',') && depth == 0 {
            definitions.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    Err("unbalanced parentheses".into())
}

/// Type name words (plus any size arguments) up to the first constraint.
fn declared_type(tokens: &[Token]) -> Option<String> {
    let mut words: Vec<String> = Vec::new();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        match token {
            Token::Word(w) if !CONSTRAINT_KEYWORDS.iter().any(|k| w.eq_ignore_ascii_case(k)) => {
                words.push(w.clone())
            }
            Token::Symbol('(') if !words.is_empty() => {
                let mut args = String::from("(");
                for inner in iter.by_ref() {
                    match inner {
                        Token::Symbol(')') => break,
                        Token::Number(n) => args.push_str(n),
                        Token::Symbol(c) => args.push(*c),
                        _ => {}
                    }
                }
                args.push(')');
                if let Some(last) = words.last_mut() {
                    last.push_str(&args);
                }
            }
            _ => break,
        }
    }
    (!words.is_empty()).then(|| words.join(" "))
}

fn is_primary_key(definition: &[Token]) -> bool {
    definition
        .windows(2)
        .any(|w| w[0].is_keyword("PRIMARY") && w[1].is_keyword("KEY"))
}

fn is_integer(declared_type: Option<&str>) -> bool {
    declared_type.is_some_and(|t| t.eq_ignore_ascii_case("INTEGER"))
}

/// `PRIMARY KEY (col)` at table level, when it names exactly one column.
fn single_column_primary_key(definition: &[Token]) -> Option<String> {
    let key = definition
        .windows(2)
        .position(|w| w[0].is_keyword("PRIMARY") && w[1].is_keyword("KEY"))?;
    match &definition[key + 2..] {
        [open, column, close, ..] if open.is_symbol('(') && close.is_symbol(')') => {
            column.ident().map(str::to_owned)
        }
        _ => None,
    }
}
