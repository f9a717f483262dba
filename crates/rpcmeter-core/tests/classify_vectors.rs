//! Request/response vector tests for routing keys and outcome classification.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rpcmeter_core::{EnvelopeError, MetricEvent, Outcome, ResponseEnvelope, RoutingKey};

mod vector_loader;
use vector_loader::load;

fn routing_kind(e: &EnvelopeError) -> &'static str {
    match e {
        EnvelopeError::Decode(_) => "decode",
        EnvelopeError::NotAnObject => "not_an_object",
        EnvelopeError::MissingRoutingKey => "missing",
        EnvelopeError::MalformedRoutingKey(_) => "malformed",
    }
}

#[test]
fn classify_vectors() {
    let files = [
        "user_get_query.json",
        "order_cancel_not_found.json",
        "internal_failure.json",
        "null_error.json",
        "three_segments.json",
        "undecodable_response.json",
        "missing_method.json",
        "non_string_method.json",
        "single_segment.json",
        "undecodable_request.json",
    ];

    for f in files {
        let v = load(f);
        let key = RoutingKey::from_request_body(v.request.as_bytes());

        if let Some(err) = v.expect_error {
            let e = key.expect_err("expected routing error");
            assert_eq!(routing_kind(&e), err.routing, "vector={}", v.description);
            continue;
        }

        let key = key.expect("expected routing key");
        let response = ResponseEnvelope::from_slice(v.response.as_bytes()).ok();
        let ev = MetricEvent::new(Outcome::classify(response.as_ref()), &key);
        let ex = v.expect.expect("missing expect block");

        assert_eq!(ev.name(), ex.counter, "vector={}", v.description);
        assert_eq!(ev.tags, ex.tags, "vector={}", v.description);
    }
}

#[test]
fn same_input_twice_yields_identical_events() {
    let v = load("user_get_query.json");
    let run = || {
        let key = RoutingKey::from_request_body(v.request.as_bytes()).unwrap();
        let response = ResponseEnvelope::from_slice(v.response.as_bytes()).ok();
        MetricEvent::new(Outcome::classify(response.as_ref()), &key)
    };
    assert_eq!(run(), run());
}
