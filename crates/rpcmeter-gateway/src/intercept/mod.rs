//! RPC interceptor (tower layer).
//!
//! Wraps any request handler. Per request:
//! - buffer the inbound body and hand the handler an identical copy
//! - run the handler into a [`CapturedResponse`] instead of the wire
//! - replay status/headers/body unmodified as the real response
//! - decode both envelopes and emit exactly one classified counter
//!
//! Decode problems never touch the relayed response. Only failures that mean
//! the client cannot get a faithful response surface as [`InterceptError`].

pub mod error;
pub mod layer;
pub mod recorder;

use serde::Deserialize;

pub use error::{handle_intercept_error, InterceptError};
pub use layer::{Intercept, InterceptLayer};
pub use recorder::CapturedResponse;

/// Default cap for buffered bodies, both directions (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// What to do when the request envelope yields no usable routing key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// Emit with `resource:unknown` / `method:unknown`.
    #[default]
    Fallback,
    /// Emit nothing for this request.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterceptOptions {
    pub max_body_bytes: usize,
    pub missing_key: MissingKeyPolicy,
}

impl Default for InterceptOptions {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            missing_key: MissingKeyPolicy::default(),
        }
    }
}
