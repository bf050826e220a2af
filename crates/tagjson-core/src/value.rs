//! The dynamically-typed value tree that the encoder walks.
//!
//! `Value` separates exact 64-bit integers from floats and carries opaque
//! host references as [`Handle`]s. Objects use a `HashMap`: insertion order
//! is never significant because the encoder re-sorts keys on output.

use std::collections::HashMap;
use std::fmt;

/// Object payload. Keys are unique by construction.
pub type Map = HashMap<String, Value>;

/// Opaque reference to an object owned by the host runtime.
///
/// The encoder treats it as a string-like scalar and writes its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The textual reference id.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything the encoder can serialize.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    /// The host runtime's "undefined" sentinel. Written as `null`.
    Undefined,
    Bool(bool),
    /// Any 64-bit float, including NaN and the infinities.
    Float(f64),
    /// Exact-precision integer, kept distinct from `Float`.
    Int64(i64),
    String(String),
    Handle(Handle),
    /// Elements in significant order.
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Build an object from key-value pairs. Later duplicates win.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array from anything yielding values.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::Array(items.into_iter().collect())
    }

    pub fn handle(id: impl Into<String>) -> Self {
        Self::Handle(Handle::new(id))
    }

    /// True for `Object` and `Array`.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Container nesting depth: 0 for scalars, 1 for a flat array or object.
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Self::Object(map) => 1 + map.values().map(Value::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Self::Handle(h)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(map)
    }
}

