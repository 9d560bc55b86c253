//! Tokenizer: raw bytes to [`TokenStream`].
//!
//! The scanner walks the input one byte at a time, keeping a 1-based line
//! number and a 1-based byte offset within the line. Every token records the
//! line and offset of its first byte.
//!
//! - Whitespace (space, tab, carriage return) is skipped; `\n` starts a new line.
//! - Strings are decoded while scanning. Supported escapes are `\" \\ \/ \b \f
//!   \n \r \t` and `\uXXXX` with exactly four hex digits.
//!   An escaped surrogate pair decodes to one character; a lone surrogate is
//!   an error. A raw newline inside a string is rejected, since multi-line
//!   strings are not supported. Other raw control bytes, tab included, are
//!   kept as they are.
//! - Numbers are an optional `-` followed by digits with at most one `.`.
//!   A `.` makes the token a float. There are no exponents, and leading zeros
//!   are not checked. Range checks happen in the parser.
//! - `true`, `false` and `null` are matched by fixed-length lookahead.
//!
//! The first error aborts tokenizing with a [`SyntaxError`].

use crate::diagnostics::SyntaxError;
use crate::error::{NjsonError, Result};
use std::fmt;
use std::slice;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    String,
    Integer,
    Float,
    True,
    False,
    Null,
    /// End of input. Always the last token of a stream.
    Eof,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexical unit with its source position.
///
/// `text` is the decoded string contents for [`TokenKind::String`], the raw
/// literal for numbers and keywords, the character itself for punctuation and
/// empty for [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub line: usize,
    pub offset: usize,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "< Token '{}' kind = {} line = {} offset = {} >",
            self.text, self.kind, self.line, self.offset
        )
    }
}

/// The ordered output of [`tokenize`], terminated by an [`TokenKind::Eof`] token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// One token per line, in the `< Token ... >` form of [`Token`]'s `Display`.
impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Scan `source` into tokens. `label` names the source in error reports.
pub fn tokenize(source: &[u8], label: &str) -> Result<TokenStream> {
    Scanner::new(source, label).run()
}

const KEYWORDS: [(&str, TokenKind); 3] = [
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("null", TokenKind::Null),
];

/// Cursor state for a single scan.
struct Scanner<'a> {
    source: &'a [u8],
    label: &'a str,
    pos: usize,
    line: usize,
    offset: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a [u8], label: &'a str) -> Self {
        Self {
            source,
            label,
            pos: 0,
            line: 1,
            offset: 1,
        }
    }

    fn run(mut self) -> Result<TokenStream> {
        let mut tokens = Vec::new();

        while let Some(byte) = self.peek() {
            let token = match byte {
                b'\n' => {
                    self.newline();
                    continue;
                }
                b' ' | b'\t' | b'\r' => {
                    self.bump(1);
                    continue;
                }
                b'{' => self.single(TokenKind::LeftBrace),
                b'}' => self.single(TokenKind::RightBrace),
                b'[' => self.single(TokenKind::LeftBracket),
                b']' => self.single(TokenKind::RightBracket),
                b':' => self.single(TokenKind::Colon),
                b',' => self.single(TokenKind::Comma),
                b'"' => self.string()?,
                b'-' | b'0'..=b'9' => self.number(),
                _ => match self.keyword() {
                    Some(token) => token,
                    None => {
                        let message = format!("invalid character {:?}", self.char_here());
                        return Err(self.error_here(message));
                    }
                },
            };
            tokens.push(token);
        }

        tokens.push(self.token(String::new(), TokenKind::Eof, self.line, self.offset));
        Ok(TokenStream { tokens })
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, step: usize) -> Option<u8> {
        self.source.get(self.pos + step).copied()
    }

    fn bump(&mut self, n: usize) {
        self.pos += n;
        self.offset += n;
    }

    fn newline(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.offset = 1;
    }

    fn token(&self, text: String, kind: TokenKind, line: usize, offset: usize) -> Token {
        Token {
            text,
            kind,
            line,
            offset,
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let text = char::from(self.source[self.pos]).to_string();
        let token = self.token(text, kind, self.line, self.offset);
        self.bump(1);
        token
    }

    fn keyword(&mut self) -> Option<Token> {
        let rest = &self.source[self.pos..];
        let (word, kind) = KEYWORDS
            .iter()
            .copied()
            .find(|(word, _)| rest.starts_with(word.as_bytes()))?;
        let token = self.token(word.to_string(), kind, self.line, self.offset);
        self.bump(word.len());
        Some(token)
    }

    fn number(&mut self) -> Token {
        let (line, offset) = (self.line, self.offset);
        let start = self.pos;
        let mut kind = TokenKind::Integer;

        if self.peek() == Some(b'-') {
            self.bump(1);
        }
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' => {}
                b'.' if kind == TokenKind::Integer => kind = TokenKind::Float,
                _ => break,
            }
            self.bump(1);
        }

        let text = self.source[start..self.pos]
            .iter()
            .copied()
            .map(char::from)
            .collect();
        self.token(text, kind, line, offset)
    }

    fn string(&mut self) -> Result<Token> {
        let (line, offset) = (self.line, self.offset);
        let mut buf = Vec::new();
        self.bump(1); // opening quote

        loop {
            match self.peek() {
                None => return Err(self.error_at(line, offset, "unterminated string literal")),
                Some(b'"') => {
                    self.bump(1);
                    break;
                }
                Some(b'\n') => {
                    return Err(self.error_here("multi-line strings are not supported"));
                }
                Some(b'\\') => self.escape(&mut buf)?,
                Some(byte) => {
                    buf.push(byte);
                    self.bump(1);
                }
            }
        }

        let text = String::from_utf8(buf)
            .map_err(|_| self.error_at(line, offset, "invalid UTF-8 in string literal"))?;
        Ok(self.token(text, TokenKind::String, line, offset))
    }

    /// Decode the escape at the cursor (which sits on the backslash) into `buf`.
    fn escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let decoded = match self.peek_at(1) {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0c,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => return self.unicode_escape(buf),
            Some(other) => {
                let message = format!("invalid escape sequence '\\{}'", char::from(other));
                return Err(self.error_here(message));
            }
            None => return Err(self.error_here("incomplete escape sequence")),
        };
        buf.push(decoded);
        self.bump(2);
        Ok(())
    }

    fn unicode_escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let code = self
            .hex_escape(self.pos)
            .ok_or_else(|| self.error_here("incomplete unicode escape, expected 4 hex digits"))?;

        // A high surrogate followed by an escaped low surrogate is one scalar.
        let (scalar, width) = match code {
            0xD800..=0xDBFF => match self.hex_escape(self.pos + 6) {
                Some(low @ 0xDC00..=0xDFFF) => {
                    (0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00), 12)
                }
                _ => (code, 6),
            },
            _ => (code, 6),
        };
        let ch = char::from_u32(scalar).ok_or_else(|| {
            self.error_here(format!("invalid unicode escape '\\u{code:04x}'"))
        })?;

        let mut encoded = [0u8; 4];
        buf.extend_from_slice(ch.encode_utf8(&mut encoded).as_bytes());
        self.bump(width);
        Ok(())
    }

    /// Value of the `\uXXXX` escape starting at `at`, if it is well formed.
    fn hex_escape(&self, at: usize) -> Option<u32> {
        let [b'\\', b'u', digits @ ..] = self.source.get(at..at + 6)? else {
            return None;
        };
        if !digits.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        std::str::from_utf8(digits)
            .ok()
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
    }

    fn char_here(&self) -> char {
        let end = (self.pos + 4).min(self.source.len());
        String::from_utf8_lossy(&self.source[self.pos..end])
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn error_here(&self, message: impl Into<String>) -> NjsonError {
        self.error_at(self.line, self.offset, message)
    }

    fn error_at(
        &self,
        line: usize,
        offset: usize,
        message: impl Into<String>,
    ) -> NjsonError {
        SyntaxError::new(self.source, self.label, line, offset, message).into()
    }
}
