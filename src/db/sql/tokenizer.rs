//! A small SQL tokenizer shared by the SELECT and CREATE TABLE recognizers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: keyword or unquoted identifier.
    Word(String),
    /// Identifier wrapped in "", `` or [].
    QuotedIdent(String),
    /// String literal wrapped in ''.
    Str(String),
    Number(String),
    Symbol(char),
}

impl Token {
    /// Whether this token is the given keyword, ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, Token::Symbol(c) if *c == symbol)
    }

    /// The identifier this token names, quoted or not.
    pub fn ident(&self) -> Option<&str> {
        match self {
            Token::Word(w) | Token::QuotedIdent(w) => Some(w),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated {0} quote")]
    Unterminated(char),
    #[error("unexpected character '{0}'")]
    Unexpected(char),
}

struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            let token = match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                '-' if self.starts_line_comment() => {
                    self.skip_line();
                    continue;
                }
                '\'' => Token::Str(self.quoted('\'', '\'')?),
                '"' => Token::QuotedIdent(self.quoted('"', '"')?),
                '`' => Token::QuotedIdent(self.quoted('`', '`')?),
                '[' => Token::QuotedIdent(self.quoted('[', ']')?),
                '0'..='9' => Token::Number(self.number()),
                '.' if self.digit_follows() => Token::Number(self.number()),
                c if c.is_alphabetic() || c == '_' => Token::Word(self.word()),
                c if c.is_ascii_punctuation() => {
                    self.chars.next();
                    Token::Symbol(c)
                }
                other => return Err(LexError::Unexpected(other)),
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn starts_line_comment(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.peek() == Some(&'-')
    }

    fn digit_follows(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.peek().is_some_and(char::is_ascii_digit)
    }

    fn skip_line(&mut self) {
        for c in self.chars.by_ref() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Read a quoted run; a doubled closing quote stands for itself.
    fn quoted(&mut self, open: char, close: char) -> Result<String, LexError> {
        self.chars.next();
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(LexError::Unterminated(open)),
                Some(c) if c == close => {
                    if close != ']' && self.chars.peek() == Some(&close) {
                        self.chars.next();
                        out.push(close);
                    } else {
                        return Ok(out);
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || c == '.' {
                out.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        out
    }

    fn word(&mut self) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                out.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        out
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(input).tokenize()
}
