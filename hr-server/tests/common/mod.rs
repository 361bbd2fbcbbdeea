//! Oneshot helpers over an in-memory router

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use hr_server::{AppState, api};

pub fn app() -> Router {
    api::create_router(AppState::in_memory())
}

pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(json) => call_raw(app, method, uri, json.to_string()).await,
        None => {
            let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            send(app, request).await
        }
    }
}

/// Sends `body` verbatim as `application/json`
pub async fn call_raw(app: &Router, method: &str, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
