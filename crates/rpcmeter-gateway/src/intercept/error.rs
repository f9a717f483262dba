//! Interceptor failures that reach the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tower::BoxError;

use rpcmeter_core::error::ClientCode;

#[derive(Debug, Error)]
pub enum InterceptError {
    /// Inbound body over the configured cap. Handler never ran.
    #[error("request body exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },
    /// Inbound body could not be read. Handler never ran.
    #[error("request body read failed: {0}")]
    RequestBody(BoxError),
    /// Handler response could not be captured, so it cannot be relayed.
    #[error("response relay failed: {0}")]
    Relay(BoxError),
    /// The wrapped service itself returned an error.
    #[error("wrapped handler failed: {0}")]
    Inner(BoxError),
}

impl InterceptError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            InterceptError::RequestTooLarge { .. } => ClientCode::PayloadTooLarge,
            InterceptError::RequestBody(_) => ClientCode::BadRequest,
            InterceptError::Relay(_) | InterceptError::Inner(_) => ClientCode::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            InterceptError::RequestTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            InterceptError::RequestBody(_) => StatusCode::BAD_REQUEST,
            InterceptError::Relay(_) => StatusCode::BAD_GATEWAY,
            InterceptError::Inner(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InterceptError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.client_code().as_str(),
            "msg": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

/// Error handler for `axum::error_handling::HandleErrorLayer`.
pub async fn handle_intercept_error(err: InterceptError) -> Response {
    tracing::error!(error = %err, "interceptor failed");
    err.into_response()
}
