//! rpcmeter gateway
//!
//! - `POST /rpc` (configurable): built-in dispatcher behind the interceptor
//! - `GET /metrics`: classified RPC counters
//! - `GET /healthz`
//!
//! Config path: first CLI argument, else `rpcmeter.yaml`.

use tracing_subscriber::{fmt, EnvFilter};

use rpcmeter_core::error::{Result, RpcMeterError};
use rpcmeter_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "rpcmeter.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.gateway.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "rpcmeter-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| RpcMeterError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| RpcMeterError::Internal(format!("server failed: {e}")))
}
