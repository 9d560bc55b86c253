//! Recursive-descent parser: [`TokenStream`] to [`Document`].
//!
//! Grammar (LL(1); each rule is one parser method):
//!
//! ```text
//! Json    := Object EOF
//! Element := String | Integer | Float | Bool | Null | Array | Object
//! Array   := '[' ( Element ( ',' Element )* )? ']'
//! Object  := '{' ( Pair ( ',' Pair )* )? '}'
//! Pair    := String ':' Element
//! ```
//!
//! The root must be an object. Trailing commas are rejected. The first
//! violation aborts the parse with a [`SyntaxError`] positioned at the
//! current token, and no partial tree is returned.

use crate::diagnostics::SyntaxError;
use crate::document::Document;
use crate::error::{NjsonError, Result};
use crate::options::ParseOptions;
use crate::tokenizer::{tokenize, Token, TokenKind, TokenStream};
use crate::value::{Object, Value};
use std::path::Path;
use tracing::{debug, trace};

/// Label used in diagnostics by [`parse_str`].
pub const SOURCE_LABEL: &str = "<source>";

// Only seen for an empty token slice; `tokenize` always ends a stream with a
// positioned Eof token, which reads past the end fall back to.
static EOF: Token = Token {
    text: String::new(),
    kind: TokenKind::Eof,
    line: 0,
    offset: 0,
};

/// Parse an in-memory buffer with default [`ParseOptions`].
///
/// `label` only appears in error reports.
///
/// ```
/// let doc = njson_core::parse_text(br#"{"a": {"b": [1, 2.5]}}"#, "inline").unwrap();
/// assert_eq!(doc.lookup("a.b").unwrap().to_array().len(), 2);
/// ```
pub fn parse_text(source: &[u8], label: &str) -> Result<Document> {
    parse_text_with(source, label, &ParseOptions::default())
}

/// Parse an in-memory buffer with explicit options.
pub fn parse_text_with(source: &[u8], label: &str, options: &ParseOptions) -> Result<Document> {
    trace!(label, max_depth = options.max_depth, "parsing");
    let tokens = tokenize(source, label)?;
    debug!(label, tokens = tokens.len(), "tokenized");

    let root = Parser::new(&tokens, source, label, options).parse_json()?;
    debug!(label, keys = root.len(), "parsed document");
    Ok(Document::new(root, label))
}

/// Parse a string slice, labelled `<source>` in diagnostics.
pub fn parse_str(text: &str) -> Result<Document> {
    parse_text(text.as_bytes(), SOURCE_LABEL)
}

/// Read and parse a file with default [`ParseOptions`]. The path is the label.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_file_with(path, &ParseOptions::default())
}

pub fn parse_file_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let source = std::fs::read(path).map_err(|source| NjsonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_text_with(&source, &path.display().to_string(), options)
}

/// Single forward pass over a materialized token stream.
struct Parser<'a> {
    tokens: &'a [Token],
    source: &'a [u8],
    label: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(
        tokens: &'a TokenStream,
        source: &'a [u8],
        label: &'a str,
        options: &ParseOptions,
    ) -> Self {
        Self {
            tokens: tokens.as_slice(),
            source,
            label,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn current(&self) -> &'a Token {
        self.lookahead(0)
    }

    fn lookahead(&self, n: usize) -> &'a Token {
        self.tokens
            .get(self.pos + n)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    fn error(&self, message: impl Into<String>) -> NjsonError {
        let token = self.current();
        SyntaxError::new(self.source, self.label, token.line, token.offset, message).into()
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if !self.at(kind) {
            return Err(self.error(format!("expect {kind}, found {}", self.current().kind)));
        }
        self.advance();
        Ok(())
    }

    fn parse_json(&mut self) -> Result<Object> {
        if !self.at(TokenKind::LeftBrace) {
            return Err(self.error(format!(
                "expect '{{' at start of document, found {}",
                self.current().kind
            )));
        }
        let root = self.object()?;
        if !self.at(TokenKind::Eof) {
            return Err(self.error("unexpected content after root object"));
        }
        Ok(root)
    }

    /// Parse one element, or return `None` without consuming anything if the
    /// current token cannot start one. Callers choose the error message.
    fn element(&mut self) -> Result<Option<Value>> {
        let token = self.current();
        let value = match token.kind {
            TokenKind::String => Value::String(token.text.clone()),
            TokenKind::Integer => self.integer(token)?,
            TokenKind::Float => self.float(token)?,
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::Null => Value::Null,
            TokenKind::LeftBracket => return self.array().map(Some),
            TokenKind::LeftBrace => return self.object().map(|o| Some(Value::Object(o))),
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(value))
    }

    fn integer(&self, token: &Token) -> Result<Value> {
        token
            .text
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| self.error(format!("invalid integer literal '{}'", token.text)))
    }

    fn float(&self, token: &Token) -> Result<Value> {
        token
            .text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| self.error(format!("invalid float literal '{}'", token.text)))
    }

    fn array(&mut self) -> Result<Value> {
        self.enter()?;
        self.advance(); // '['

        let mut items = Vec::new();
        if !self.at(TokenKind::RightBracket) {
            loop {
                let item = self
                    .element()?
                    .ok_or_else(|| self.error("expect Element or ']'"))?;
                items.push(item);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            if !self.at(TokenKind::RightBracket) {
                return Err(self.error("expect ',' or ']'"));
            }
        }

        self.advance(); // ']'
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn object(&mut self) -> Result<Object> {
        self.enter()?;
        self.advance(); // '{'

        let mut object = Object::new();
        if !self.at(TokenKind::RightBrace) {
            loop {
                let (key, value) = self.pair()?;
                object.insert(key, value);
                if !self.at(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
            if !self.at(TokenKind::RightBrace) {
                return Err(self.error("expect ',' or '}'"));
            }
        }

        self.advance(); // '}'
        self.depth -= 1;
        Ok(object)
    }

    fn pair(&mut self) -> Result<(String, Value)> {
        let key = self.current();
        if !key.is(TokenKind::String) {
            return Err(self.error(format!("expect string key, found {}", key.kind)));
        }
        self.advance();
        self.expect(TokenKind::Colon)?;
        let value = self.element()?.ok_or_else(|| self.error("expect Element"))?;
        Ok((key.text.clone(), value))
    }

    /// Track nesting at an opening bracket, failing past `max_depth`.
    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(self.error(format!("nesting too deep (limit {})", self.max_depth)));
        }
        self.depth += 1;
        Ok(())
    }
}
