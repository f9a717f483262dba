//! Top-level facade crate for rpcmeter.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use rpcmeter_core::*;
}

pub mod gateway {
    pub use rpcmeter_gateway::*;
}
