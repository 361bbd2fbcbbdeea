//! HTTP API

pub mod departments;
pub mod directory;
pub mod employees;
pub mod extract;
pub mod health;
pub mod jobs;
pub mod personnel;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

const REQUEST_ID: &str = "x-request-id";

/// Request ids reuse the snowflake generator
#[derive(Clone, Default)]
struct SnowflakeRequestId;

impl MakeRequestId for SnowflakeRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = shared::util::snowflake_id().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(departments::router())
        .merge(jobs::router())
        .merge(employees::router())
        .merge(directory::router())
        .merge(personnel::router())
        .merge(health::router())
}

/// Routes plus middleware, bound to `state`
pub fn create_router(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID)))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID),
            SnowflakeRequestId,
        ))
        .with_state(state)
}
