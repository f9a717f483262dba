use std::net::SocketAddr;

use rpcmeter_core::error::{Result, RpcMeterError};
use serde::Deserialize;

use crate::intercept::{InterceptOptions, MissingKeyPolicy, DEFAULT_MAX_BODY_BYTES};

const MIN_BODY_BYTES: usize = 1024;
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub stats: StatsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RpcMeterError::UnsupportedVersion);
        }
        self.gateway.validate()?;
        self.stats.validate()?;
        Ok(())
    }

    pub fn intercept_options(&self) -> InterceptOptions {
        InterceptOptions {
            max_body_bytes: self.gateway.max_body_bytes,
            missing_key: self.stats.missing_key,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            rpc_path: default_rpc_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.rpc_path.starts_with('/') {
            return Err(RpcMeterError::BadRequest(
                "gateway.rpc_path must start with '/'".into(),
            ));
        }
        if !(MIN_BODY_BYTES..=MAX_BODY_BYTES).contains(&self.max_body_bytes) {
            return Err(RpcMeterError::BadRequest(format!(
                "gateway.max_body_bytes must be between {MIN_BODY_BYTES} and {MAX_BODY_BYTES}"
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            RpcMeterError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsSection {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub missing_key: MissingKeyPolicy,
}

impl Default for StatsSection {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            missing_key: MissingKeyPolicy::default(),
        }
    }
}

impl StatsSection {
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.namespace.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let tail_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !(head_ok && tail_ok) {
            return Err(RpcMeterError::BadRequest(format!(
                "stats.namespace must match [a-zA-Z_][a-zA-Z0-9_]*, got {:?}",
                self.namespace
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_rpc_path() -> String {
    "/rpc".into()
}
fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}
fn default_namespace() -> String {
    "rpcmeter".into()
}
