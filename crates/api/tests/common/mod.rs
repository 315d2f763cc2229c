//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use casabook_api::config::ServerConfig;
use casabook_api::router::build_app_router;
use casabook_api::state::AppState;
use casabook_db::models::property::CreateProperty;
use casabook_db::repositories::PropertyRepo;
use casabook_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and the default 10% tax rate.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        tax_rate: 0.10,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Reuses [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        events: Arc::new(EventBus::default()),
    };
    build_app_router(state, &config)
}

/// Seed a property with the reference pricing constants used across the
/// API tests: base 5000/night, cleaning 1000, service 500, capacity 6.
pub async fn seed_property(pool: &PgPool) -> i64 {
    PropertyRepo::create(
        pool,
        &CreateProperty {
            name: "Casa Mirlo".to_string(),
            base_price: 5000,
            cleaning_fee: Some(1000),
            service_fee: Some(500),
            max_guests: Some(6),
            default_minimum_stay: Some(1),
        },
    )
    .await
    .unwrap()
    .id
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request to the app and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body, None).await
}

/// Send a JSON POST request carrying an `x-auth-role` header.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    role: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::POST, uri, body, Some(role)).await
}

/// Send a JSON PATCH request to the app and return the raw response.
pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body, None).await
}

/// Send a JSON DELETE request carrying an `x-auth-role` header.
pub async fn delete_json_as(
    app: Router,
    uri: &str,
    role: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::DELETE, uri, body, Some(role)).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    role: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(role) = role {
        builder = builder.header("x-auth-role", role);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not valid JSON: {e}: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}
