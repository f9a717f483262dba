//! In-memory response recorder.
//!
//! The wrapped handler's response is drained into a [`CapturedResponse`]
//! before anything is sent. One recorder per request; it is consumed by the
//! request that created it and dropped with it.

use axum::{
    body::Body,
    http::{HeaderMap, StatusCode, Version},
    response::Response,
};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};

use super::InterceptError;

#[derive(Debug, Clone)]
pub struct CapturedResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl CapturedResponse {
    /// Drain `res` fully, up to `limit` body bytes.
    pub async fn record(res: Response, limit: usize) -> Result<Self, InterceptError> {
        let (parts, body) = res.into_parts();
        let body = Limited::new(body, limit)
            .collect()
            .await
            .map_err(InterceptError::Relay)?
            .to_bytes();
        Ok(Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            body,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Build the real response: headers (every value, in order), status, body.
    pub fn replay(&self) -> Response {
        let mut out = Response::new(Body::from(self.body.clone()));
        let headers = out.headers_mut();
        for (name, value) in self.headers.iter() {
            headers.append(name.clone(), value.clone());
        }
        *out.status_mut() = self.status;
        *out.version_mut() = self.version;
        out
    }
}

/// Read an inbound body up to `limit` bytes.
pub async fn read_request_body(body: Body, limit: usize) -> Result<Bytes, InterceptError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(InterceptError::RequestTooLarge { limit }),
        Err(e) => Err(InterceptError::RequestBody(e)),
    }
}
