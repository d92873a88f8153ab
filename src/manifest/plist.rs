//! Reader for the OpenStep property list format used by `project.pbxproj`
//!
//! Only the subset Xcode writes is supported: dictionaries, arrays, quoted and
//! bare strings, and `/* */` or `//` comments. Dictionary keys keep file order.

use indexmap::IndexMap;
use thiserror::Error;

/// A parsed property list value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    String(String),
    Array(Vec<PlistValue>),
    Dict(IndexMap<String, PlistValue>),
}

impl PlistValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&IndexMap<String, PlistValue>> {
        match self {
            PlistValue::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Look up a key when this value is a dictionary
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dict().and_then(|d| d.get(key))
    }
}

/// Syntax error with the 1-based line it was found on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PlistError {
    pub line: usize,
    pub message: String,
}

/// Parse a whole property list document
pub fn parse(text: &str) -> Result<PlistValue, PlistError> {
    let mut parser = Parser::new(text);
    let value = parser.value()?;
    parser.skip_trivia()?;
    if parser.peek().is_some() {
        return Err(parser.error("unexpected content after root value"));
    }
    Ok(value)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '+' | '/' | ':' | '.' | '-')
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> PlistError {
        PlistError {
            line: self.line,
            message: message.into(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<(), PlistError> {
        self.skip_trivia()?;
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), PlistError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    match lookahead.next() {
                        Some('/') => {
                            while let Some(c) = self.bump() {
                                if c == '\n' {
                                    break;
                                }
                            }
                        }
                        Some('*') => {
                            self.bump();
                            self.bump();
                            let mut previous = '\0';
                            loop {
                                match self.bump() {
                                    Some('/') if previous == '*' => break,
                                    Some(c) => previous = c,
                                    None => return Err(self.error("unterminated comment")),
                                }
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn value(&mut self) -> Result<PlistValue, PlistError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.dict(),
            Some('(') => self.array(),
            Some(_) => self.string().map(PlistValue::String),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn dict(&mut self) -> Result<PlistValue, PlistError> {
        self.expect('{')?;
        let mut entries = IndexMap::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(PlistValue::Dict(entries));
            }
            let key = self.string()?;
            self.expect('=')?;
            let value = self.value()?;
            self.expect(';')?;
            entries.insert(key, value);
        }
    }

    fn array(&mut self) -> Result<PlistValue, PlistError> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(')') {
                self.bump();
                return Ok(PlistValue::Array(items));
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') => {}
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{}'", c))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn string(&mut self) -> Result<String, PlistError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('"') => self.quoted(),
            Some(c) if is_bare_char(c) => {
                let mut text = String::new();
                while let Some(c) = self.peek().filter(|c| is_bare_char(*c)) {
                    text.push(c);
                    self.bump();
                }
                Ok(text)
            }
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn quoted(&mut self) -> Result<String, PlistError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(text),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(c) => text.push(c),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => text.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }
}
