//! Response envelope: only the `error` field matters.

use serde_json::Value;

use super::{decode_object, EnvelopeError};

/// Wire literal that selects the not-found category.
pub const NOT_FOUND: &str = "not found";

/// Decoded response envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseEnvelope {
    /// `error` as sent, `None` when absent or JSON `null`.
    pub error: Option<Value>,
}

impl ResponseEnvelope {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let mut map = decode_object(bytes)?;
        let error = match map.remove("error") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        };
        Ok(Self { error })
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// True only for the exact string `"not found"`.
    pub fn is_not_found(&self) -> bool {
        matches!(&self.error, Some(Value::String(s)) if s == NOT_FOUND)
    }
}
