//! Source-position-aware syntax error reports.
//!
//! Both the tokenizer and the parser fail through [`SyntaxError`], which
//! captures the source label, the 1-based line and offset, the text of the
//! offending line and a message. The line is looked up by re-scanning the
//! source when the error is built. No line index is kept during parsing,
//! since this path only runs once per failed parse.
//!
//! A rendered report looks like:
//!
//! ```text
//! file config.json : line 3 : offset 12
//!    "name": "ab
//!               ^
//! syntax error: multi-line strings are not supported
//! ```

use std::fmt;

const INVALID_LINE: &str = "(invalid line number)";

/// A syntax error pinned to a position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    label: String,
    line: usize,
    offset: usize,
    source_line: Option<String>,
    message: String,
}

impl SyntaxError {
    /// Build a report for `line`/`offset` in `source`.
    ///
    /// A line number of `0` or past the end of `source` is not an error here;
    /// the report prints `(invalid line number)` in place of the source text.
    pub fn new(
        source: &[u8],
        label: &str,
        line: usize,
        offset: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            label: label.to_string(),
            line,
            offset,
            source_line: source_line(source, line),
            message: message.into(),
        }
    }

    /// The source identifier (file path or a caller-chosen label).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Text of the offending line without its line terminator, if the line
    /// number was valid.
    pub fn source_line(&self) -> Option<&str> {
        self.source_line.as_deref()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source_line {
            Some(text) => {
                writeln!(
                    f,
                    "file {} : line {} : offset {}",
                    self.label, self.line, self.offset
                )?;
                writeln!(f, "   {text}")?;
                writeln!(f, "   {}^", caret_padding(text, self.offset))?;
            }
            None => writeln!(f, "file {} : {INVALID_LINE}", self.label)?,
        }
        write!(f, "syntax error: {}", self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Return 1-based line `line` of `source`, without `\n` or a trailing `\r`.
pub fn source_line(source: &[u8], line: usize) -> Option<String> {
    let index = line.checked_sub(1)?;
    source.split(|&b| b == b'\n').nth(index).map(|raw| {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        String::from_utf8_lossy(raw).into_owned()
    })
}

// Tabs are copied so the caret lines up with the echoed source line.
fn caret_padding(text: &str, offset: usize) -> String {
    let column = offset.saturating_sub(1);
    text.char_indices()
        .take_while(|(i, _)| *i < column)
        .map(|(_, c)| if c == '\t' { '\t' } else { ' ' })
        .collect()
}
