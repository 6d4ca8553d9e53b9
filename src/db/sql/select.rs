//! Recognizer for the supported query subset:
//! `SELECT <projection> FROM <table> [WHERE <column> = <literal>]`.

use crate::db::error::{Error, Result};
use crate::db::page::Value;

use super::tokenizer::{Token, tokenize};

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    CountStar,
    /// `*`: every column in declaration order.
    AllColumns,
    Columns(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Literal {
    /// SQL equality against a stored value; NULL never matches.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Integer(a), Value::Integer(b)) => a == b,
            (Literal::Integer(a), Value::Real(b)) => (*a as f64) == *b,
            (Literal::Real(a), Value::Real(b)) => a == b,
            (Literal::Real(a), Value::Integer(b)) => *a == (*b as f64),
            (Literal::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub projection: Projection,
    pub table: String,
    pub filter: Option<Filter>,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

fn unsupported(reason: impl Into<String>) -> Error {
    Error::UnsupportedQueryShape(reason.into())
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_keyword(keyword)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_symbol(&mut self, symbol: char) -> bool {
        if self.peek().is_some_and(|t| t.is_symbol(symbol)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<()> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(unsupported(format!("expected '{symbol}'")))
        }
    }

    fn identifier(&mut self, what: &str) -> Result<String> {
        match self.next() {
            Some(Token::Word(w)) if !is_reserved(&w) => Ok(w),
            Some(Token::QuotedIdent(w)) => Ok(w),
            Some(other) => Err(unsupported(format!("expected {what}, found {other:?}"))),
            None => Err(unsupported(format!("expected {what}"))),
        }
    }

    fn statement(&mut self) -> Result<SelectStatement> {
        if !self.eat_keyword("SELECT") {
            return Err(unsupported("only SELECT statements are supported"));
        }
        if self.eat_keyword("DISTINCT") || self.eat_keyword("ALL") {
            return Err(unsupported("DISTINCT/ALL qualifiers"));
        }

        let projection = self.projection()?;

        if !self.eat_keyword("FROM") {
            return match self.peek() {
                None => Err(Error::MissingFromClause),
                Some(t) if t.is_symbol(';') => Err(Error::MissingFromClause),
                Some(other) => Err(unsupported(format!("unexpected {other:?} in select list"))),
            };
        }

        if self.peek().is_some_and(|t| t.is_symbol('(')) {
            return Err(unsupported("subqueries in FROM"));
        }
        let table = self.identifier("table name")?;
        if self.eat_symbol('.') {
            return Err(unsupported("schema-qualified table names"));
        }

        let filter = if self.eat_keyword("WHERE") {
            Some(self.filter()?)
        } else {
            None
        };

        self.eat_symbol(';');
        match self.peek() {
            None => Ok(SelectStatement {
                projection,
                table,
                filter,
            }),
            Some(t) if t.is_symbol(',') => Err(unsupported("multiple FROM items")),
            Some(t) if t.is_keyword("JOIN") || t.is_keyword("INNER") || t.is_keyword("LEFT")
                || t.is_keyword("CROSS") || t.is_keyword("NATURAL") =>
            {
                Err(unsupported("joins"))
            }
            Some(t)
                if filter.is_none()
                    && (t.is_keyword("AS") || matches!(t, Token::Word(w) if !is_reserved(w))) =>
            {
                Err(unsupported("table aliases"))
            }
            Some(other) => Err(unsupported(format!("unexpected trailing {other:?}"))),
        }
    }

    fn projection(&mut self) -> Result<Projection> {
        if self.eat_symbol('*') {
            return Ok(Projection::AllColumns);
        }
        if self.peek().is_some_and(|t| t.is_keyword("COUNT")) {
            self.pos += 1;
            self.expect_symbol('(')?;
            self.expect_symbol('*')?;
            self.expect_symbol(')')?;
            return Ok(Projection::CountStar);
        }

        let mut columns = vec![self.identifier("column name")?];
        while self.eat_symbol(',') {
            columns.push(self.identifier("column name")?);
        }
        Ok(Projection::Columns(columns))
    }

    fn filter(&mut self) -> Result<Filter> {
        let column = self.identifier("column name")?;
        if !self.eat_symbol('=') {
            return Err(unsupported("only `column = literal` predicates"));
        }
        let negative = self.eat_symbol('-');
        let value = match self.next() {
            Some(Token::Str(s)) if !negative => Literal::Text(s),
            Some(Token::Number(n)) => parse_number(&n, negative)?,
            _ => return Err(unsupported("only `column = literal` predicates")),
        };
        if self.peek().is_some_and(|t| t.is_keyword("AND") || t.is_keyword("OR")) {
            return Err(unsupported("compound predicates"));
        }
        Ok(Filter { column, value })
    }
}

fn parse_number(text: &str, negative: bool) -> Result<Literal> {
    let signed = if negative {
        format!("-{text}")
    } else {
        text.to_owned()
    };
    if let Ok(v) = signed.parse::<i64>() {
        return Ok(Literal::Integer(v));
    }
    signed
        .parse::<f64>()
        .map(Literal::Real)
        .map_err(|_| unsupported(format!("invalid number {signed}")))
}

fn is_reserved(word: &str) -> bool {
    const RESERVED: &[&str] = &[
        "SELECT", "FROM", "WHERE", "AND", "OR", "AS", "JOIN", "ON", "GROUP", "ORDER", "LIMIT",
        "UNION", "HAVING", "INNER", "LEFT", "CROSS", "NATURAL",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(word))
}

/// Recognize a query in the supported subset.
pub fn parse_select(sql: &str) -> Result<SelectStatement> {
    let tokens = tokenize(sql).map_err(|e| unsupported(e.to_string()))?;
    Parser { tokens, pos: 0 }.statement()
}
