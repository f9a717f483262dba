//! rpcmeter gateway library entry.
//!
//! This crate wires the RPC interceptor, stats sinks, config loader and the
//! built-in dispatcher into an axum application. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests; the
//! [`intercept`] and [`stats`] modules are usable on their own around any
//! tower service.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod intercept;
pub mod ops;
pub mod router;
pub mod services;
pub mod stats;
