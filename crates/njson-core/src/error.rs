//! Error types for parsing and navigating njson documents.

use crate::diagnostics::SyntaxError;
use crate::value::ValueKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the njson entry points.
#[derive(Error, Debug)]
pub enum NjsonError {
    /// The input violated the JSON grammar or contained an invalid character.
    /// The whole parse is abandoned; no partial document is returned.
    #[error("{0}")]
    Syntax(Box<SyntaxError>),

    /// The input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path or key lookup failed.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl NjsonError {
    /// The diagnostics report, if this is a syntax error.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            NjsonError::Syntax(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<SyntaxError> for NjsonError {
    fn from(err: SyntaxError) -> Self {
        NjsonError::Syntax(Box::new(err))
    }
}

/// Lookup failures from [`Document::lookup`](crate::Document::lookup) and
/// [`Value::get`](crate::Value::get). They never affect the parsed tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment named a key that does not exist.
    #[error("{path} : key '{segment}' does not exist")]
    NotFound { path: String, segment: String },

    /// A segment resolved to a value of the wrong kind to descend into.
    #[error("{path} : element '{segment}' is {found}, expected {expected}")]
    TypeMismatch {
        path: String,
        segment: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// An array index outside `[0, len)`.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Convenience alias used throughout njson-core.
pub type Result<T> = std::result::Result<T, NjsonError>;
