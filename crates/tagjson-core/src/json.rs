//! Interop with `serde_json` — reading ordinary JSON into a [`Value`] tree.
//!
//! Parsing is delegated to `serde_json`; this module only maps its value
//! model onto ours. Strings that are exactly a sentinel tag come back as the
//! typed value they stand for, so text produced by [`encode`](crate::encode)
//! reads back losslessly (within the limits documented in [`crate::tags`]).

use crate::encoder::{EncodeOptions, Encoder};
use crate::error::{Result, TagJsonError};
use crate::tags::untag;
use crate::value::{Map, Value};
use serde_json::Number;

impl Value {
    /// Convert a parsed `serde_json::Value`.
    ///
    /// - strings: sentinel tags become `Float`/`Int64`, others stay `String`
    /// - numbers: `Float`, except integer literals that an f64 would round
    ///   (for example `9007199254740993`), which become `Int64`
    /// - such integers above `i64::MAX` have no variant and are rejected
    ///   with [`TagJsonError::UnsupportedValueType`]
    ///
    /// ```
    /// use serde_json::json;
    /// use tagjson_core::Value;
    ///
    /// let v = Value::from_json(&json!({"n": "@i64@2a$i64$", "x": 1.5})).unwrap();
    /// let obj = v.as_object().unwrap();
    /// assert_eq!(obj["n"], Value::Int64(42));
    /// assert_eq!(obj["x"], Value::Float(1.5));
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Result<Value> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => number_to_value(n)?,
            serde_json::Value::String(s) => untag(s).unwrap_or_else(|| Value::String(s.clone())),
            serde_json::Value::Array(arr) => Value::Array(
                arr.iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(obj) => {
                let mut map = Map::with_capacity(obj.len());
                for (key, val) in obj {
                    map.insert(key.clone(), Value::from_json(val)?);
                }
                Value::Object(map)
            }
        })
    }

    /// Parse JSON text with `serde_json` and convert it.
    pub fn parse_json(text: &str) -> Result<Value> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Value::from_json(&json)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = TagJsonError;

    fn try_from(json: &serde_json::Value) -> Result<Self> {
        Value::from_json(json)
    }
}

/// Map a JSON number onto `Float` or `Int64` without losing precision.
///
/// An integer literal is a `Float` exactly when it is the text the encoder
/// writes for its nearest f64 (large integral floats come out as long digit
/// strings padded with zeros). Any other integer literal would be rounded
/// by the conversion, so it is kept as an `Int64` instead.
fn number_to_value(n: &Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        let f = i as f64;
        return Ok(if is_float_text(f, &i.to_string()) {
            Value::Float(f)
        } else {
            Value::Int64(i)
        });
    }
    if let Some(u) = n.as_u64() {
        let f = u as f64;
        if is_float_text(f, &u.to_string()) {
            return Ok(Value::Float(f));
        }
        return Err(TagJsonError::UnsupportedValueType(format!(
            "integer {} does not fit in a signed 64-bit value",
            u
        )));
    }
    n.as_f64()
        .map(Value::Float)
        .ok_or_else(|| TagJsonError::UnsupportedValueType(format!("number {}", n)))
}

/// True if `literal` is how the encoder spells `f`.
fn is_float_text(f: f64, literal: &str) -> bool {
    f.to_string() == literal
}

/// Re-encode JSON text in sorted, tagged form.
///
/// Returns [`TagJsonError::JsonParse`] if `json` is not valid JSON.
///
/// ```
/// use tagjson_core::{encode_json, EncodeOptions};
///
/// let out = encode_json(r#"{"b":[1,2],"a":null}"#, &EncodeOptions::default()).unwrap();
/// assert_eq!(out, r#"{"a":null,"b":[1,2]}"#);
/// ```
pub fn encode_json(json: &str, options: &EncodeOptions) -> Result<String> {
    let value = Value::parse_json(json)?;
    Encoder::with_options(options.clone()).encode(&value)
}
