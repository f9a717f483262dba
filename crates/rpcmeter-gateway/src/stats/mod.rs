//! Stats sinks: where classified RPC counters go.
//!
//! The interceptor only knows [`StatsSink`]. Sinks are fire-and-forget: no
//! return value, no acknowledgement, and they must never block the request.
//!
//! - [`CounterRegistry`]: in-process counters rendered by `/metrics`.
//! - [`TracingSink`]: one structured log event per increment.
//! - [`FanoutSink`]: forwards to several sinks in order.

pub mod registry;

use std::sync::Arc;

pub use registry::CounterRegistry;

/// Counter backend consumed by the interceptor.
pub trait StatsSink: Send + Sync {
    /// Increment `name` by one. Tags are `key:value` strings.
    fn increment(&self, name: &str, tags: &[String]);
}

impl<T: StatsSink + ?Sized> StatsSink for Arc<T> {
    fn increment(&self, name: &str, tags: &[String]) {
        (**self).increment(name, tags)
    }
}

/// Logs each increment under the `rpcmeter::stats` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatsSink for TracingSink {
    fn increment(&self, name: &str, tags: &[String]) {
        tracing::info!(target: "rpcmeter::stats", counter = %name, tags = ?tags, "increment");
    }
}

#[derive(Default, Clone)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn StatsSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn StatsSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl StatsSink for FanoutSink {
    fn increment(&self, name: &str, tags: &[String]) {
        for s in &self.sinks {
            s.increment(name, tags);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fanout_reaches_every_sink() {
        let a = Arc::new(CounterRegistry::new("a"));
        let b = Arc::new(CounterRegistry::new("b"));
        let fan = FanoutSink::new()
            .with(a.clone())
            .with(b.clone())
            .with(Arc::new(TracingSink));
        assert_eq!(fan.len(), 3);

        let tags = vec!["resource:user".to_string(), "method:get".to_string()];
        fan.increment("query", &tags);

        assert_eq!(a.get("query", &tags), 1);
        assert_eq!(b.get("query", &tags), 1);
    }
}
