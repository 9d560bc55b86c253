//! Typed JSON values.
//!
//! A parsed document is a tree of [`Value`] nodes. Integers and floats are kept
//! apart (`42` and `42.0` are different variants), and [`Object`] remembers the
//! order its keys appeared in the source.
//!
//! # Narrowing accessors
//!
//! Two families of accessors exist:
//!
//! - `as_*` return `Option` and are `None` for any other variant.
//! - `to_*` never fail: reading through the wrong variant yields a fixed
//!   default (`""`, `0`, `0.0`, `false`, an empty slice or an empty object).
//!   There is no cross-variant coercion, so `Value::Integer(3).to_f64()` is `0.0`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::slice;
use std::sync::LazyLock;

static EMPTY_OBJECT: LazyLock<Object> = LazyLock::new(Object::new);

/// One node of a parsed JSON tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<Value>),
    Object(Object),
    #[default]
    Null,
}

/// The variant tag of a [`Value`], used in error messages and for dispatch
/// without borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Bool,
    Array,
    Object,
    Null,
}

impl ValueKind {
    /// Lower-case name of the kind, e.g. `"integer"`.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// True for both integers and floats.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The string payload, or `""` for any other variant.
    pub fn to_str(&self) -> &str {
        self.as_str().unwrap_or("")
    }

    /// The integer payload, or `0` for any other variant (floats included).
    pub fn to_i64(&self) -> i64 {
        self.as_i64().unwrap_or(0)
    }

    /// The float payload, or `0.0` for any other variant (integers included).
    pub fn to_f64(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    /// The bool payload, or `false` for any other variant.
    pub fn to_bool(&self) -> bool {
        self.as_bool().unwrap_or(false)
    }

    /// The array elements, or an empty slice for any other variant.
    pub fn to_array(&self) -> &[Value] {
        self.as_array().unwrap_or(&[])
    }

    /// The object payload, or a shared empty object for any other variant.
    pub fn to_object(&self) -> &Object {
        self.as_object().unwrap_or(&EMPTY_OBJECT)
    }
}

/// Debug rendering: objects as `{k : v, ...}`, arrays as `[v, ...]`, strings
/// single-quoted. Nothing is escaped, so the output is not JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "'{s}'"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(object) => write!(f, "{object}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

/// A JSON object: key lookup plus the source order of its keys.
///
/// `keys` records every key occurrence, so a key written twice appears twice.
/// The mapping keeps the last value written for a key. Iteration, [`len`] and
/// rendering visit each distinct key once, in order of first occurrence.
///
/// [`len`]: Object::len
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: HashMap<String, Value>,
    keys: Vec<String>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.keys.push(key.clone());
        self.entries.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every key occurrence in source order, duplicates included.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Distinct `(key, value)` pairs in order of first occurrence.
    pub fn iter(&self) -> Iter<'_> {
        let has_duplicates = self.keys.len() != self.entries.len();
        Iter {
            entries: &self.entries,
            keys: self.keys.iter(),
            seen: has_duplicates.then(HashSet::new),
        }
    }

    /// Values in the same order as [`Object::iter`].
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.iter().map(|(_, value)| value)
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} : {value}")?;
        }
        f.write_str("}")
    }
}

/// Iterator over the distinct entries of an [`Object`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    entries: &'a HashMap<String, Value>,
    keys: slice::Iter<'a, String>,
    // Only allocated when the object holds a duplicated key.
    seen: Option<HashSet<&'a str>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = self.keys.next()?;
            if let Some(seen) = self.seen.as_mut() {
                if !seen.insert(key.as_str()) {
                    continue;
                }
            }
            if let Some(value) = self.entries.get(key) {
                return Some((key.as_str(), value));
            }
        }
    }
}
