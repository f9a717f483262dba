//! `InterceptLayer` / `Intercept` service.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{body::Body, extract::Request, response::Response};
use futures_util::future::BoxFuture;
use tower::{BoxError, Layer, Service};

use rpcmeter_core::{MetricEvent, Outcome, ResponseEnvelope, RoutingKey};

use super::recorder::{read_request_body, CapturedResponse};
use super::{InterceptError, InterceptOptions, MissingKeyPolicy};
use crate::stats::StatsSink;

/// Layer that wraps a handler with RPC outcome counting.
///
/// The stats sink is injected here and shared by every request through an
/// `Arc`; nothing else is shared across requests.
#[derive(Clone)]
pub struct InterceptLayer {
    stats: Arc<dyn StatsSink>,
    opts: InterceptOptions,
}

impl InterceptLayer {
    pub fn new(stats: Arc<dyn StatsSink>) -> Self {
        Self {
            stats,
            opts: InterceptOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: InterceptOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.opts.max_body_bytes = limit;
        self
    }

    pub fn missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.opts.missing_key = policy;
        self
    }
}

impl<S> Layer<S> for InterceptLayer {
    type Service = Intercept<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Intercept {
            inner,
            stats: Arc::clone(&self.stats),
            opts: self.opts,
        }
    }
}

#[derive(Clone)]
pub struct Intercept<S> {
    inner: S,
    stats: Arc<dyn StatsSink>,
    opts: InterceptOptions,
}

impl<S> Service<Request> for Intercept<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
{
    type Response = Response;
    type Error = InterceptError;
    type Future = BoxFuture<'static, Result<Response, InterceptError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .poll_ready(cx)
            .map_err(|e| InterceptError::Inner(e.into()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Keep the instance that was driven ready; leave a fresh clone behind.
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);
        let stats = Arc::clone(&self.stats);
        let opts = self.opts;
        Box::pin(intercept(req, inner, stats, opts))
    }
}

/// One request, start to finish:
/// Received -> Duplicated -> Invoked -> Relayed -> Classified -> Emitted.
async fn intercept<S>(
    req: Request,
    mut inner: S,
    stats: Arc<dyn StatsSink>,
    opts: InterceptOptions,
) -> Result<Response, InterceptError>
where
    S: Service<Request, Response = Response>,
    S::Error: Into<BoxError>,
{
    // Duplicated: the original stream is consumed here, exactly once.
    let (parts, body) = req.into_parts();
    let req_bytes = read_request_body(body, opts.max_body_bytes).await?;
    let req = Request::from_parts(parts, Body::from(req_bytes.clone()));

    // Invoked: the handler writes into the recorder, not the wire.
    let invoked: Result<Response, BoxError> = inner.call(req).await.map_err(Into::into);

    let key = routing_key(&req_bytes, opts.missing_key);

    let res = match invoked {
        Ok(res) => res,
        Err(e) => {
            emit(stats.as_ref(), key.as_ref(), Outcome::Error);
            return Err(InterceptError::Inner(e));
        }
    };
    let captured = match CapturedResponse::record(res, opts.max_body_bytes).await {
        Ok(c) => c,
        Err(e) => {
            emit(stats.as_ref(), key.as_ref(), Outcome::Error);
            return Err(e);
        }
    };

    // Relayed
    let relayed = captured.replay();

    // Classified
    let envelope = match ResponseEnvelope::from_slice(captured.body()) {
        Ok(env) => Some(env),
        Err(e) => {
            tracing::warn!(
                error = %e,
                status = %captured.status(),
                "response envelope decode failed"
            );
            None
        }
    };
    let outcome = Outcome::classify(envelope.as_ref());

    // Emitted
    emit(stats.as_ref(), key.as_ref(), outcome);

    Ok(relayed)
}

fn routing_key(req_bytes: &[u8], policy: MissingKeyPolicy) -> Option<RoutingKey> {
    match RoutingKey::from_request_body(req_bytes) {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::warn!(
                error = %e,
                policy = ?policy,
                "request envelope has no usable routing key"
            );
            match policy {
                MissingKeyPolicy::Fallback => Some(RoutingKey::unknown()),
                MissingKeyPolicy::Skip => None,
            }
        }
    }
}

fn emit(stats: &dyn StatsSink, key: Option<&RoutingKey>, outcome: Outcome) {
    let Some(key) = key else {
        tracing::debug!(counter = outcome.counter_name(), "routing key missing, counter skipped");
        return;
    };
    let ev = MetricEvent::new(outcome, key);
    tracing::debug!(
        counter = ev.name(),
        resource = key.resource(),
        method = key.action(),
        "rpc counter"
    );
    stats.increment(ev.name(), &ev.tags);
}
