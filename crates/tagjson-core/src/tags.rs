//! Sentinel tags — smuggling non-JSON scalars through JSON strings.
//!
//! JSON has no spelling for `NaN`, the infinities, or integers wider than a
//! double's 53-bit mantissa. The default [`SentinelTags`] scheme writes them
//! as reserved strings that a tag-aware decoder turns back into typed values:
//!
//! | Value | Wire form |
//! |---|---|
//! | `+Infinity` | `"@@infinity$$"` |
//! | `-Infinity` | `"@@-infinity$$"` |
//! | `NaN` | `"@@nan$$"` |
//! | `Int64(n)` | `"@i64@<hex>$i64$"` |
//!
//! The hex payload is the two's-complement bit pattern of `n`, lowercase,
//! without zero padding: `0` is `@i64@0$i64$`, `-1` is
//! `@i64@ffffffffffffffff$i64$`.
//!
//! A decoder without tag support still reads valid strings, losing only the
//! type. Any input string that happens to equal a sentinel is
//! indistinguishable from the tagged value after decoding.
//!
//! The encoder only talks to the [`TagScheme`] trait, so an alternative
//! representation such as [`PlainNumbers`] can be swapped in without
//! touching the traversal.

use crate::value::Value;
use std::fmt::Write;

pub const INFINITY_TAG: &str = "@@infinity$$";
pub const NEG_INFINITY_TAG: &str = "@@-infinity$$";
pub const NAN_TAG: &str = "@@nan$$";
pub const INT64_PREFIX: &str = "@i64@";
pub const INT64_SUFFIX: &str = "$i64$";

/// How the encoder spells scalars that plain JSON cannot carry.
pub trait TagScheme {
    /// Write an exact 64-bit integer.
    fn write_int64(&self, value: i64, out: &mut String);

    /// Write a float that is NaN or infinite. Never called for finite values.
    fn write_non_finite(&self, value: f64, out: &mut String);
}

/// The reversible sentinel-string scheme. This is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentinelTags;

impl TagScheme for SentinelTags {
    fn write_int64(&self, value: i64, out: &mut String) {
        out.push('"');
        out.push_str(INT64_PREFIX);
        // Writing into a String cannot fail.
        let _ = write!(out, "{:x}", value as u64);
        out.push_str(INT64_SUFFIX);
        out.push('"');
    }

    fn write_non_finite(&self, value: f64, out: &mut String) {
        out.push('"');
        out.push_str(non_finite_tag(value));
        out.push('"');
    }
}

/// Plain JSON: integers as bare decimals, non-finite floats as `null`.
///
/// Lossy for consumers that read every number as a double, and for
/// NaN/Infinity. Useful when the reader is an ordinary JSON parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainNumbers;

impl TagScheme for PlainNumbers {
    fn write_int64(&self, value: i64, out: &mut String) {
        let _ = write!(out, "{}", value);
    }

    fn write_non_finite(&self, _value: f64, out: &mut String) {
        out.push_str("null");
    }
}

/// The sentinel text (without quotes) for a non-finite float.
fn non_finite_tag(value: f64) -> &'static str {
    if value.is_nan() {
        NAN_TAG
    } else if value.is_sign_positive() {
        INFINITY_TAG
    } else {
        NEG_INFINITY_TAG
    }
}

/// Recognise a decoded JSON string that is exactly one sentinel tag.
///
/// Returns the typed value the tag stands for, or `None` if `s` is an
/// ordinary string. The `Int64` payload must be 1 to 16 lowercase hex
/// digits; anything else is left alone.
///
/// ```
/// use tagjson_core::{untag, Value};
///
/// assert_eq!(untag("@i64@ff$i64$"), Some(Value::Int64(255)));
/// assert_eq!(untag("@i64@ffffffffffffffff$i64$"), Some(Value::Int64(-1)));
/// assert!(matches!(untag("@@nan$$"), Some(Value::Float(f)) if f.is_nan()));
/// assert_eq!(untag("hello"), None);
/// ```
pub fn untag(s: &str) -> Option<Value> {
    match s {
        INFINITY_TAG => return Some(Value::Float(f64::INFINITY)),
        NEG_INFINITY_TAG => return Some(Value::Float(f64::NEG_INFINITY)),
        NAN_TAG => return Some(Value::Float(f64::NAN)),
        _ => {}
    }
    let hex = s.strip_prefix(INT64_PREFIX)?.strip_suffix(INT64_SUFFIX)?;
    parse_hex_bits(hex).map(|bits| Value::Int64(bits as i64))
}

/// Parse the payload written by [`SentinelTags::write_int64`].
fn parse_hex_bits(hex: &str) -> Option<u64> {
    if hex.is_empty() || hex.len() > 16 {
        return None;
    }
    if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return None;
    }
    u64::from_str_radix(hex, 16).ok()
}
