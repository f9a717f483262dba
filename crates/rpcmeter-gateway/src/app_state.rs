//! Shared application state for the rpcmeter gateway.
//!
//! Owns the config, the RPC dispatcher that the interceptor wraps, and the
//! stats sinks. The sinks are built once here and injected into the
//! interceptor layer; there is no process-wide stats client.

use std::sync::Arc;

use rpcmeter_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::intercept::InterceptLayer;
use crate::services::EchoService;
use crate::stats::{CounterRegistry, FanoutSink, StatsSink, TracingSink};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    dispatcher: Dispatcher,
    registry: Arc<CounterRegistry>,
    stats: Arc<dyn StatsSink>,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let registry = Arc::new(CounterRegistry::new(cfg.stats.namespace.clone()));
        let stats: Arc<dyn StatsSink> = Arc::new(
            FanoutSink::new()
                .with(registry.clone())
                .with(Arc::new(TracingSink)),
        );

        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(EchoService::new()));
        tracing::info!(services = ?dispatcher.registered(), "rpc services registered");

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                dispatcher,
                registry,
                stats,
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn registry(&self) -> Arc<CounterRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn stats(&self) -> Arc<dyn StatsSink> {
        Arc::clone(&self.inner.stats)
    }

    /// Interceptor configured from `gateway.max_body_bytes` and `stats.missing_key`.
    pub fn intercept_layer(&self) -> InterceptLayer {
        InterceptLayer::new(self.stats()).with_options(self.cfg().intercept_options())
    }
}
