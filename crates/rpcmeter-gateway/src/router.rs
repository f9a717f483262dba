//! Axum router wiring.
//!
//! Only matched RPC requests sit behind the interceptor (`route_layer`), so
//! ops endpoints, unknown paths and wrong-method requests are never counted.
//! Interceptor errors are turned into responses by `HandleErrorLayer`.
//!
//! The interceptor enforces `gateway.max_body_bytes`, so axum's own default
//! body limit is disabled for the RPC route.

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

use crate::{app_state::AppState, dispatch, intercept, ops};

pub fn build_router(state: AppState) -> Router {
    let rpc = Router::new()
        .route(&state.cfg().gateway.rpc_path, post(dispatch::rpc_handler))
        .route_layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(intercept::handle_intercept_error))
                .layer(state.intercept_layer())
                .layer(DefaultBodyLimit::disable()),
        );

    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .merge(rpc)
        .with_state(state)
}
