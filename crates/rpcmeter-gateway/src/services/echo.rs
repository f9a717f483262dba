use async_trait::async_trait;
use serde_json::Value;

use rpcmeter_core::error::{Result, RpcMeterError};

use crate::dispatch::RpcService;

/// `Echo.Say` returns its params untouched. Any other action is not found.
#[derive(Default)]
pub struct EchoService;

impl EchoService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RpcService for EchoService {
    fn resource(&self) -> &'static str {
        "echo"
    }

    async fn call(&self, action: &str, params: Value) -> Result<Value> {
        match action {
            "say" => Ok(params),
            "fail" => Err(RpcMeterError::Internal("echo asked to fail".into())),
            _ => Err(RpcMeterError::NotFound),
        }
    }
}
