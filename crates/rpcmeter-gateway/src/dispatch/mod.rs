//! Dispatcher module exports.
//!
//! The dispatcher is the handler the interceptor wraps in the shipped binary:
//! a small `<Resource>.<Action>` JSON-RPC router over registered services.

pub mod dispatcher;

pub use dispatcher::{rpc_handler, Dispatcher, RpcCall, RpcService};
