//! Deterministic JSON encoder with sorted keys and sentinel tags.
//!
//! The encoder walks a [`Value`] tree depth-first and writes straight into a
//! single growable `String`:
//!
//! - **Sorted keys**: object keys are emitted in ascending byte order, so two
//!   objects with the same entries always produce the same text
//! - **Order-preserving arrays**: elements keep their sequence order
//! - **Minimal escaping**: only `"` is escaped inside strings and keys;
//!   backslashes, control characters and newlines are written verbatim
//! - **Tagged scalars**: `Int64`, NaN and the infinities go through a
//!   [`TagScheme`] (sentinel strings by default)
//! - **Two layouts**: compact (no whitespace, `":"`) or pretty (2-space
//!   indent, one element per line, `": "`)
//!
//! # Example
//! ```
//! use tagjson_core::{encode, Value};
//!
//! let v = Value::object([("b", Value::Float(1.0)), ("a", Value::Float(2.0))]);
//! assert_eq!(encode(&v, false), r#"{"a":2,"b":1}"#);
//! ```

use crate::error::{Result, TagJsonError};
use crate::tags::{SentinelTags, TagScheme};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Encode a value tree with the default sentinel tags.
///
/// `prettify` selects the 2-space indented layout. This never fails: every
/// `Value` variant has an encoding, and a `Value` tree is acyclic by
/// ownership. Nesting depth is bounded only by the stack; use an
/// [`Encoder`] with [`max_depth`](Encoder::max_depth) for untrusted input.
///
/// The tree is borrowed immutably for the whole call, so it cannot change
/// underneath the encoder; independent trees can be encoded from several
/// threads at once.
pub fn encode(value: &Value, prettify: bool) -> String {
    let mut out = String::new();
    Writer {
        pretty: prettify,
        tags: &SentinelTags,
    }
    .write_value(value, 0, &mut out);
    tracing::trace!(bytes = out.len(), pretty = prettify, "encoded value tree");
    out
}

/// Settings for an [`Encoder`].
///
/// Deserializable so callers can keep them in a config file; missing fields
/// take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// 2-space indentation and newlines instead of compact output.
    pub pretty: bool,
    /// Maximum container nesting. `None` means unlimited.
    pub max_depth: Option<usize>,
}

/// Configurable encoder: layout, depth guard and tag scheme.
///
/// ```
/// use tagjson_core::{Encoder, PlainNumbers, TagJsonError, Value};
///
/// let v = Value::array([Value::Int64(7)]);
/// let plain = Encoder::new().tags(PlainNumbers).encode(&v).unwrap();
/// assert_eq!(plain, "[7]");
///
/// let guarded = Encoder::new().max_depth(Some(0)).encode(&v);
/// assert!(matches!(guarded, Err(TagJsonError::MaxDepthExceeded { limit: 0 })));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder<T = SentinelTags> {
    options: EncodeOptions,
    tags: T,
}

impl Encoder<SentinelTags> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            options,
            tags: SentinelTags,
        }
    }
}

impl<T: TagScheme> Encoder<T> {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.options.pretty = pretty;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Replace the tag scheme, keeping the options.
    pub fn tags<U: TagScheme>(self, tags: U) -> Encoder<U> {
        Encoder {
            options: self.options,
            tags,
        }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `value`, enforcing the depth limit if one is set.
    ///
    /// The limit is checked before anything is written, so a failure never
    /// leaves partial output behind.
    pub fn encode(&self, value: &Value) -> Result<String> {
        tracing::debug!(
            pretty = self.options.pretty,
            max_depth = ?self.options.max_depth,
            "encoding value tree"
        );
        if let Some(limit) = self.options.max_depth {
            if exceeds_depth(value, limit) {
                tracing::warn!(limit, "value tree nests deeper than the configured limit");
                return Err(TagJsonError::MaxDepthExceeded { limit });
            }
        }
        let mut out = String::new();
        Writer {
            pretty: self.options.pretty,
            tags: &self.tags,
        }
        .write_value(value, 0, &mut out);
        Ok(out)
    }
}

/// True if `value` holds more than `limit` levels of nested containers.
///
/// Stops descending once the limit is passed, so its own recursion is
/// bounded by `limit + 1` regardless of the input.
fn exceeds_depth(value: &Value, limit: usize) -> bool {
    match value {
        Value::Array(items) => limit == 0 || items.iter().any(|v| exceeds_depth(v, limit - 1)),
        Value::Object(map) => limit == 0 || map.values().any(|v| exceeds_depth(v, limit - 1)),
        _ => false,
    }
}

/// Per-call formatting state. `depth` is threaded through explicitly, never
/// stored.
struct Writer<'a, T: TagScheme + ?Sized> {
    pretty: bool,
    tags: &'a T,
}

impl<T: TagScheme + ?Sized> Writer<'_, T> {
    /// Dispatch: objects, then arrays, then each scalar kind.
    fn write_value(&self, value: &Value, depth: usize, out: &mut String) {
        match value {
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                self.write_container('{', '}', entries.as_slice(), depth, out, |(key, val), out| {
                    write_quoted(key, out);
                    out.push_str(if self.pretty { ": " } else { ":" });
                    self.write_value(val, depth + 1, out);
                });
            }
            Value::Array(items) => {
                self.write_container('[', ']', items.as_slice(), depth, out, |item, out| {
                    self.write_value(item, depth + 1, out);
                });
            }
            Value::Null | Value::Undefined => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Float(f) if f.is_finite() => {
                // `Display` for f64 is the shortest text that parses back to
                // the same bits, and never uses an exponent.
                let _ = write!(out, "{}", f);
            }
            Value::Float(f) => self.tags.write_non_finite(*f, out),
            Value::Int64(i) => self.tags.write_int64(*i, out),
            Value::String(s) => write_quoted(s, out),
            Value::Handle(h) => write_quoted(h.id(), out),
        }
    }

    /// Shared layout for objects and arrays. Members sit at `depth + 1`; the
    /// closing delimiter goes back to `depth`.
    fn write_container<E>(
        &self,
        open: char,
        close: char,
        members: &[E],
        depth: usize,
        out: &mut String,
        mut write_member: impl FnMut(&E, &mut String),
    ) {
        out.push(open);
        if self.pretty {
            out.push('\n');
        }
        let last = members.len().saturating_sub(1);
        for (i, member) in members.iter().enumerate() {
            if self.pretty {
                push_indent(depth + 1, out);
            }
            write_member(member, out);
            if i < last {
                out.push(',');
            }
            if self.pretty {
                out.push('\n');
            }
        }
        if self.pretty {
            push_indent(depth, out);
        }
        out.push(close);
    }
}

/// Emit `s` in double quotes, escaping `"` and nothing else.
fn write_quoted(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' {
            out.push_str("\\\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

/// Two spaces per nesting level.
fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
