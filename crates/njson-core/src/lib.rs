//! # njson-core
//!
//! A small JSON text parser that turns bytes into a typed value tree and
//! reports syntax errors with the offending source line.
//!
//! ## Quick start
//!
//! ```rust
//! use njson_core::{parse_str, Value};
//!
//! let doc = parse_str(r#"{"server": {"port": 8080, "hosts": ["a", "b"]}}"#).unwrap();
//! assert_eq!(doc.lookup("server.port").unwrap(), &Value::Integer(8080));
//! assert_eq!(doc.render(), "{server : {port : 8080, hosts : ['a', 'b']}}");
//!
//! let err = parse_str("{\"a\": [1,]}").unwrap_err();
//! assert!(err.to_string().contains("expect Element or ']'"));
//! ```
//!
//! The accepted language is standard JSON with these differences: the root must
//! be an object, numbers have no exponent form, strings cannot span lines, and
//! there are no comments.
//!
//! ## Modules
//!
//! - [`tokenizer`]: bytes to token stream, with escape decoding and positions
//! - [`parser`]: token stream to [`Document`] by recursive descent; entry points
//! - [`value`]: [`Value`] / [`Object`] tree and narrowing accessors
//! - [`document`]: dotted-path lookup, keyed access and iteration
//! - [`diagnostics`]: [`SyntaxError`] reports with line, offset and source text
//! - [`options`]: [`ParseOptions`] (nesting limit)
//! - [`error`]: error types

pub mod diagnostics;
pub mod document;
pub mod error;
pub mod options;
pub mod parser;
pub mod tokenizer;
pub mod value;

pub use diagnostics::SyntaxError;
pub use document::{Document, ValueKey, Values};
pub use error::{NjsonError, PathError};
pub use options::ParseOptions;
pub use parser::{parse_file, parse_file_with, parse_str, parse_text, parse_text_with};
pub use tokenizer::{tokenize, Token, TokenKind, TokenStream};
pub use value::{Object, Value, ValueKind};
