//! Request envelope and the routing key derived from `method`.

use serde_json::Value;

use super::{decode_object, EnvelopeError};

/// Placeholder used for both tags when the routing key cannot be recovered.
pub const UNKNOWN_SEGMENT: &str = "unknown";

/// Decoded request envelope. Only `method` is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    pub method: String,
}

impl RequestEnvelope {
    /// Decode from raw body bytes, requiring a string `method`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let mut map = decode_object(bytes)?;
        match map.remove("method") {
            Some(Value::String(method)) => Ok(Self { method }),
            _ => Err(EnvelopeError::MissingRoutingKey),
        }
    }

    /// Validated routing key for this envelope.
    pub fn routing_key(&self) -> Result<RoutingKey, EnvelopeError> {
        RoutingKey::parse(&self.method)
    }
}

/// `<resource>.<action>` split out of an RPC method name, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutingKey {
    resource: String,
    action: String,
}

impl RoutingKey {
    /// Parse `"User.Get"` (or `"User.Get.Extra"`) into `user` / `get`.
    ///
    /// Segments past the second are ignored. Fewer than two segments, or an
    /// empty first/second segment, is rejected.
    pub fn parse(method: &str) -> Result<Self, EnvelopeError> {
        let mut parts = method.split('.');
        let resource = parts.next().unwrap_or_default();
        let action = parts.next().unwrap_or_default();
        if resource.is_empty() || action.is_empty() {
            return Err(EnvelopeError::MalformedRoutingKey(method.to_string()));
        }
        Ok(Self {
            resource: resource.to_lowercase(),
            action: action.to_lowercase(),
        })
    }

    /// Key used when the request envelope could not provide one.
    pub fn unknown() -> Self {
        Self {
            resource: UNKNOWN_SEGMENT.to_string(),
            action: UNKNOWN_SEGMENT.to_string(),
        }
    }

    /// Decode a request body straight to its routing key.
    pub fn from_request_body(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        RequestEnvelope::from_slice(bytes)?.routing_key()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Metric tags in emission order: `resource:<r>`, `method:<a>`.
    pub fn tags(&self) -> Vec<String> {
        vec![
            format!("resource:{}", self.resource),
            format!("method:{}", self.action),
        ]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn lowercases_both_segments() {
        let key = RoutingKey::parse("User.Get").unwrap();
        assert_eq!(key.resource(), "user");
        assert_eq!(key.action(), "get");
        assert_eq!(key.tags(), vec!["resource:user", "method:get"]);
    }

    #[test]
    fn extra_segments_are_ignored() {
        let key = RoutingKey::parse("Billing.Invoice.Void").unwrap();
        assert_eq!(key.resource(), "billing");
        assert_eq!(key.action(), "invoice");
    }

    #[test]
    fn single_segment_is_malformed() {
        for m in ["", "Ping", "User.", ".Get", "."] {
            assert!(
                matches!(RoutingKey::parse(m), Err(EnvelopeError::MalformedRoutingKey(_))),
                "method={m:?}"
            );
        }
    }

    #[test]
    fn non_string_method_is_missing() {
        let err = RequestEnvelope::from_slice(br#"{"method": 42}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingRoutingKey));
        let err = RequestEnvelope::from_slice(br#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingRoutingKey));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = RequestEnvelope::from_slice(b"[1,2]").unwrap_err();
        assert!(matches!(err, EnvelopeError::NotAnObject));
        let err = RequestEnvelope::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, EnvelopeError::Decode(_)));
    }
}
