//! Outcome classification and the metric event emitted per RPC exchange.
//!
//! Classification looks only at the response envelope's `error` field. The
//! HTTP status is deliberately not an input: a handler may answer 200 with an
//! error envelope, or 404 with a result.

use crate::envelope::{ResponseEnvelope, RoutingKey};

/// Three-way result of one RPC exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No `error` (or `error: null`).
    Query,
    /// `error` is exactly `"not found"`.
    NotFound,
    /// Any other non-null `error`.
    Error,
}

impl Outcome {
    /// Classify a decoded response envelope.
    ///
    /// `None` means the response body did not decode; that takes the default
    /// `Query` path, same as an envelope without `error`.
    pub fn classify(response: Option<&ResponseEnvelope>) -> Self {
        match response {
            Some(env) if env.is_not_found() => Outcome::NotFound,
            Some(env) if env.is_error() => Outcome::Error,
            _ => Outcome::Query,
        }
    }

    /// Counter name emitted to the stats sink.
    pub fn counter_name(self) -> &'static str {
        match self {
            Outcome::Query => "query",
            Outcome::NotFound => "error.notfound",
            Outcome::Error => "error",
        }
    }
}

/// Counter name plus tag set. Built per request, handed to a sink, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEvent {
    pub outcome: Outcome,
    pub tags: Vec<String>,
}

impl MetricEvent {
    pub fn new(outcome: Outcome, key: &RoutingKey) -> Self {
        Self {
            outcome,
            tags: key.tags(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.outcome.counter_name()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn classify(body: &str) -> Outcome {
        let env = ResponseEnvelope::from_slice(body.as_bytes()).ok();
        Outcome::classify(env.as_ref())
    }

    #[test]
    fn status_independent_three_way_split() {
        assert_eq!(classify(r#"{"result":{"id":7}}"#), Outcome::Query);
        assert_eq!(classify(r#"{"error":null}"#), Outcome::Query);
        assert_eq!(classify(r#"{"error":"not found"}"#), Outcome::NotFound);
        assert_eq!(classify(r#"{"error":"internal failure"}"#), Outcome::Error);
    }

    #[test]
    fn not_found_must_match_exactly() {
        assert_eq!(classify(r#"{"error":"Not Found"}"#), Outcome::Error);
        assert_eq!(classify(r#"{"error":{"msg":"not found"}}"#), Outcome::Error);
        assert_eq!(classify(r#"{"error":false}"#), Outcome::Error);
    }

    #[test]
    fn undecodable_response_defaults_to_query() {
        assert_eq!(classify("<html>oops</html>"), Outcome::Query);
        assert_eq!(classify(""), Outcome::Query);
    }

    #[test]
    fn event_carries_name_and_tags() {
        let key = RoutingKey::parse("Order.Cancel").unwrap();
        let ev = MetricEvent::new(Outcome::NotFound, &key);
        assert_eq!(ev.name(), "error.notfound");
        assert_eq!(ev.tags, vec!["resource:order", "method:cancel"]);
    }
}
