//! # tagjson-core
//!
//! Deterministic JSON encoder for dynamically-typed value trees.
//!
//! Standard JSON serializers leave map keys in whatever order the map hands
//! them out and have no spelling for 64-bit integers, `NaN` or the
//! infinities. tagjson fixes both: object keys are always sorted, so equal
//! trees produce byte-identical text, and non-JSON scalars are written as
//! reversible sentinel strings that a tag-aware decoder turns back into
//! typed values.
//!
//! ## Quick start
//!
//! ```rust
//! use tagjson_core::{encode, untag, Value};
//!
//! let v = Value::object([
//!     ("score", Value::Float(123.0)),
//!     ("id", Value::Int64(255)),
//!     ("ratio", Value::Float(f64::NAN)),
//! ]);
//! let text = encode(&v, false);
//! assert_eq!(text, r#"{"id":"@i64@ff$i64$","ratio":"@@nan$$","score":123}"#);
//!
//! assert_eq!(untag("@i64@ff$i64$"), Some(Value::Int64(255)));
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] — `Value` tree → sorted, tagged JSON text
//! - [`tags`] — sentinel tag scheme and tag recognition (`untag`)
//! - [`json`] — `serde_json` interop (`Value::from_json`, `encode_json`)
//! - [`value`] — the `Value` sum type and `Handle`
//! - [`error`] — Error types for interop and depth-limited encoding

pub mod encoder;
pub mod error;
pub mod json;
pub mod tags;
pub mod value;

pub use encoder::{encode, EncodeOptions, Encoder};
pub use error::TagJsonError;
pub use json::encode_json;
pub use tags::{untag, PlainNumbers, SentinelTags, TagScheme};
pub use value::{Handle, Map, Value};
