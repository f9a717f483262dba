use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use serde::Deserialize;
use serde_json::{json, Value};

use rpcmeter_core::error::{ClientCode, Result, RpcMeterError};
use rpcmeter_core::RoutingKey;

use crate::app_state::AppState;

/// RPC services keyed by resource name.
#[async_trait]
pub trait RpcService: Send + Sync {
    /// Lowercase resource this service answers for (e.g. `"echo"`).
    fn resource(&self) -> &'static str;
    /// `action` is already lowercased.
    async fn call(&self, action: &str, params: Value) -> Result<Value>;
}

/// Inbound call envelope.
#[derive(Debug, Deserialize)]
pub struct RpcCall {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Default)]
pub struct Dispatcher {
    services: DashMap<&'static str, Arc<dyn RpcService>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            services: DashMap::new(),
        }
    }

    pub fn register(&self, svc: Arc<dyn RpcService>) {
        self.services.insert(svc.resource(), svc);
    }

    pub fn registered(&self) -> Vec<&'static str> {
        self.services.iter().map(|e| *e.key()).collect()
    }

    pub async fn dispatch(&self, call: RpcCall) -> Result<Value> {
        let key = RoutingKey::parse(&call.method)
            .map_err(|e| RpcMeterError::BadRequest(e.to_string()))?;
        let handler = self
            .services
            .get(key.resource())
            .ok_or(RpcMeterError::NotFound)?
            .value()
            .clone();
        handler.call(key.action(), call.params).await
    }
}

fn error_response(err: &RpcMeterError) -> Response {
    let status = match err.client_code() {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::UnsupportedVersion | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

/// `POST <rpc_path>`: `{"method":"Echo.Say","params":...}` -> `{"result":...}`.
pub async fn rpc_handler(State(app): State<AppState>, body: Bytes) -> Response {
    let call: RpcCall = match serde_json::from_slice(&body) {
        Ok(c) => c,
        Err(e) => {
            let err = RpcMeterError::BadRequest(format!("invalid rpc envelope: {e}"));
            return error_response(&err);
        }
    };
    match app.dispatcher().dispatch(call).await {
        Ok(result) => (StatusCode::OK, Json(json!({ "result": result }))).into_response(),
        Err(e) => error_response(&e),
    }
}
