//! RPC envelopes (request + response) carried inside HTTP bodies.
//!
//! Both sides are decoded from raw bytes the gateway already buffered:
//! - Request: only `method` is read, validated into a [`RoutingKey`].
//! - Response: only `error` is read, kept as a raw JSON value.
//!
//! Decoding never panics. Every failure is an [`EnvelopeError`] so callers can
//! log it and fall back instead of aborting the exchange.

pub mod request;
pub mod response;

use thiserror::Error;

pub use request::{RequestEnvelope, RoutingKey};
pub use response::ResponseEnvelope;

/// Why an envelope could not yield the data we classify on.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Body is not valid JSON.
    #[error("envelope decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    /// Body is valid JSON but not an object.
    #[error("envelope is not a JSON object")]
    NotAnObject,
    /// `method` absent, null, or not a string.
    #[error("missing routing key `method`")]
    MissingRoutingKey,
    /// `method` present but without two non-empty dot segments.
    #[error("malformed routing key: {0:?}")]
    MalformedRoutingKey(String),
}

fn decode_object(
    bytes: &[u8],
) -> Result<serde_json::Map<String, serde_json::Value>, EnvelopeError> {
    match serde_json::from_slice::<serde_json::Value>(bytes)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(EnvelopeError::NotAnObject),
    }
}
