//! rpcmeter core: transport-agnostic RPC envelopes, routing keys, outcome
//! classification, and the shared error surface.
//!
//! This crate decides *what* gets counted for one RPC exchange. It knows
//! nothing about HTTP, buffering, or where counters end up, so the gateway and
//! any future transport can share the exact same classification rules.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed envelopes surface as `EnvelopeError` so a bad body can never take
//! the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod classify;
pub mod envelope;
pub mod error;

pub use classify::{MetricEvent, Outcome};
pub use envelope::{EnvelopeError, RequestEnvelope, ResponseEnvelope, RoutingKey};
/// Shared result type.
pub use error::{Result, RpcMeterError};
