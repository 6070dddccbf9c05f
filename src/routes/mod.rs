//! Route composition: common, `/api` and `/admin` routers merged into one app.

mod admin;
mod api;
mod common;

pub use admin::admin_routes;
pub use api::api_routes;
pub use common::{common_routes, ApiDoc};

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// The full application router with request tracing and the configured body limit.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    Router::new()
        .merge(common_routes())
        .nest("/api", api_routes())
        .nest("/admin", admin_routes(state.clone()))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
