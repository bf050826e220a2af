//! Error types for tagjson encoding and interop operations.

use thiserror::Error;

/// Errors that can occur at the boundaries of the encoder.
///
/// Plain [`encode`](crate::encode) never fails; these come from the
/// `serde_json` interop layer and from an [`Encoder`](crate::Encoder) with a
/// depth limit.
#[derive(Error, Debug)]
pub enum TagJsonError {
    /// The input string was not valid JSON (interop path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A scalar with no corresponding `Value` variant was fed in.
    #[error("unsupported value type: {0}")]
    UnsupportedValueType(String),

    /// Container nesting went deeper than the configured limit.
    #[error("maximum nesting depth of {limit} exceeded")]
    MaxDepthExceeded { limit: usize },
}

/// Convenience alias used throughout tagjson-core.
pub type Result<T> = std::result::Result<T, TagJsonError>;
