//! Shared error type across rpcmeter crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed envelope or config.
    BadRequest,
    /// Unknown resource or action.
    NotFound,
    /// Body exceeds the configured limit.
    PayloadTooLarge,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RpcMeterError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum RpcMeterError {
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Rendered verbatim into RPC responses, so the text is the wire value.
    #[error("not found")]
    NotFound,
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RpcMeterError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RpcMeterError::BadRequest(_) => ClientCode::BadRequest,
            RpcMeterError::NotFound => ClientCode::NotFound,
            RpcMeterError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            RpcMeterError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            RpcMeterError::Internal(_) => ClientCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_wire_literal() {
        assert_eq!(RpcMeterError::NotFound.to_string(), "not found");
        assert_eq!(RpcMeterError::NotFound.client_code().as_str(), "NOT_FOUND");
    }
}
