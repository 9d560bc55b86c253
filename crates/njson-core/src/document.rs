//! Navigation over parsed values.
//!
//! [`Document`] wraps the root object and resolves dotted paths.
//! [`Value::get`] takes one step into an array or object, and
//! [`Value::iter`] walks the children of a container.

use crate::error::PathError;
use crate::value::{self, Object, Value, ValueKind};
use std::fmt;
use std::slice;

/// A parsed JSON document: the root object plus the label it was parsed under.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Object,
    label: String,
}

impl Document {
    pub(crate) fn new(root: Object, label: &str) -> Self {
        Self {
            root,
            label: label.to_string(),
        }
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    pub fn into_root(self) -> Object {
        self.root
    }

    /// The file path or label passed to the parse call.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolve a `.`-separated key path from the root.
    ///
    /// Every segment but the last must name an object. A missing key gives
    /// [`PathError::NotFound`]; a key whose value is not an object gives
    /// [`PathError::TypeMismatch`]. Segments are split on every `.`, so keys
    /// containing a dot cannot be reached this way (use [`Value::get`]).
    ///
    /// ```
    /// let doc = njson_core::parse_str(r#"{"a": {"b": {"c": 1}}}"#).unwrap();
    /// assert_eq!(doc.lookup("a.b.c").unwrap().to_i64(), 1);
    /// assert!(doc.lookup("a.b.d").is_err());
    /// ```
    pub fn lookup(&self, path: &str) -> Result<&Value, PathError> {
        let (parents, last) = match path.rsplit_once('.') {
            Some((parents, last)) => (Some(parents), last),
            None => (None, path),
        };

        let mut object = &self.root;
        for segment in parents.into_iter().flat_map(|p| p.split('.')) {
            object = match object.get(segment) {
                Some(Value::Object(inner)) => inner,
                Some(other) => {
                    return Err(PathError::TypeMismatch {
                        path: path.to_string(),
                        segment: segment.to_string(),
                        expected: ValueKind::Object,
                        found: other.kind(),
                    })
                }
                None => return Err(not_found(path, segment)),
            };
        }

        object.get(last).ok_or_else(|| not_found(path, last))
    }

    /// Debug rendering of the whole tree, see [`Value`]'s `Display`.
    pub fn render(&self) -> String {
        self.root.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

fn not_found(path: &str, segment: &str) -> PathError {
    PathError::NotFound {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

mod private {
    pub trait Sealed {}
}

/// A single navigation step: `usize` indexes an array, a string keys an object.
pub trait ValueKey: private::Sealed {
    fn select<'v>(&self, value: &'v Value) -> Result<&'v Value, PathError>;
}

impl private::Sealed for usize {}
impl private::Sealed for &str {}
impl private::Sealed for String {}
impl private::Sealed for &String {}

impl ValueKey for usize {
    fn select<'v>(&self, value: &'v Value) -> Result<&'v Value, PathError> {
        match value {
            Value::Array(items) => items.get(*self).ok_or(PathError::IndexOutOfRange {
                index: *self,
                len: items.len(),
            }),
            other => {
                let step = format!("[{self}]");
                Err(PathError::TypeMismatch {
                    path: step.clone(),
                    segment: step,
                    expected: ValueKind::Array,
                    found: other.kind(),
                })
            }
        }
    }
}

impl ValueKey for &str {
    fn select<'v>(&self, value: &'v Value) -> Result<&'v Value, PathError> {
        match value {
            Value::Object(object) => object.get(self).ok_or_else(|| not_found(self, self)),
            other => Err(PathError::TypeMismatch {
                path: self.to_string(),
                segment: self.to_string(),
                expected: ValueKind::Object,
                found: other.kind(),
            }),
        }
    }
}

impl ValueKey for String {
    fn select<'v>(&self, value: &'v Value) -> Result<&'v Value, PathError> {
        self.as_str().select(value)
    }
}

impl ValueKey for &String {
    fn select<'v>(&self, value: &'v Value) -> Result<&'v Value, PathError> {
        self.as_str().select(value)
    }
}

impl Value {
    /// Index into an array or key into an object.
    ///
    /// ```
    /// let doc = njson_core::parse_str(r#"{"list": [10, 20]}"#).unwrap();
    /// let list = doc.lookup("list").unwrap();
    /// assert_eq!(list.get(1).unwrap().to_i64(), 20);
    /// assert!(list.get(2).is_err());
    /// assert!(list.get("x").is_err());
    /// ```
    pub fn get<K: ValueKey>(&self, key: K) -> Result<&Value, PathError> {
        key.select(self)
    }

    /// Iterate the elements of an array, or the values of an object in key
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an array or object.
    pub fn iter(&self) -> Values<'_> {
        match self {
            Value::Array(items) => Values::Array(items.iter()),
            Value::Object(object) => Values::Object(object.iter()),
            other => panic!("cannot iterate over a {} value", other.kind()),
        }
    }
}

/// Iterator returned by [`Value::iter`].
#[derive(Debug, Clone)]
pub enum Values<'a> {
    Array(slice::Iter<'a, Value>),
    Object(value::Iter<'a>),
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Values::Array(items) => items.next(),
            Values::Object(entries) => entries.next().map(|(_, value)| value),
        }
    }
}
