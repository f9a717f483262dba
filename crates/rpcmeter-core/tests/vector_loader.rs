//! JSON test vector loader shared by envelope/classification tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    /// Raw inbound body, exactly as the client sent it.
    pub request: String,
    /// Raw body written by the wrapped handler.
    pub response: String,
    #[serde(default)]
    pub expect: Option<ExpectEvent>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectEvent {
    pub counter: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    /// `decode`, `not_an_object`, `missing` or `malformed`.
    pub routing: String,
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("bad vector {name}: {e}"))
}
