#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use datalogger_core::reading::Measurements;
use datalogger_core::registry::DataloggerRegistry;
use http_body_util::BodyExt;
use tower::ServiceExt;

use datalogger_api::config::ServerConfig;
use datalogger_api::router::build_app_router;
use datalogger_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed seed so the
/// random endpoints are reproducible.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        drift_seed: Some(7),
        ..ServerConfig::default()
    }
}

/// Build the full application router around the default fleet.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(DataloggerRegistry::initialize()))
}

/// Build the full application router around a caller-supplied registry.
///
/// Uses the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with(registry: Arc<DataloggerRegistry>) -> Router {
    build_app_router(AppState::new(registry, test_config()))
}

/// Registry whose readings are chosen by the test.
pub fn registry_from(seeds: &[(&str, Measurements)]) -> Arc<DataloggerRegistry> {
    Arc::new(
        DataloggerRegistry::from_seeds(seeds.iter().copied(), chrono::Utc::now())
            .expect("test seeds must have unique ids"),
    )
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Origin", "http://client.test")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
