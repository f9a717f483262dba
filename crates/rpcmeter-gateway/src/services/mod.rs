//! Built-in RPC services registered at startup.

pub mod echo;

pub use echo::EchoService;
