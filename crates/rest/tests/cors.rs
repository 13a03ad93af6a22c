//! CORS and middleware tests over the full application.

mod common;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use phrasebook_rest::ServerConfig;

use common::create_app_server;

const ORIGIN: HeaderName = HeaderName::from_static("origin");
const REQUEST_METHOD: HeaderName = HeaderName::from_static("access-control-request-method");

/// Test config with the production CORS defaults switched on.
fn cors_config() -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        enable_cors: true,
        cors_origins: defaults.cors_origins,
        cors_methods: defaults.cors_methods,
        cors_headers: defaults.cors_headers,
        cors_allow_credentials: defaults.cors_allow_credentials,
        ..ServerConfig::for_testing()
    }
}

#[tokio::test]
async fn test_preflight_from_configured_origin() {
    let server = create_app_server(cors_config()).await;

    let response = server
        .method(Method::OPTIONS, "/phrase/1")
        .add_header(ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .add_header(REQUEST_METHOD, HeaderValue::from_static("GET"))
        .await;

    response.assert_status_ok();
    let headers = response.headers();
    assert_eq!(
        headers
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    assert_eq!(
        headers
            .get("access-control-allow-credentials")
            .and_then(|v| v.to_str().ok()),
        Some("true")
    );
}

#[tokio::test]
async fn test_simple_request_from_other_origin_has_no_allow_header() {
    let server = create_app_server(cors_config()).await;

    let response = server
        .get("/phrase/1")
        .add_header(ORIGIN, HeaderValue::from_static("http://evil.example"))
        .await;

    // CORS is enforced by the browser; the request itself still succeeds
    response.assert_status_ok();
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let server = create_app_server(ServerConfig::for_testing()).await;

    let response = server
        .get("/phrase/1")
        .add_header(ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .await;

    response.assert_status_ok();
    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn test_full_app_serves_phrases() {
    let server = create_app_server(cors_config()).await;

    let response = server.get("/phrase/2/fr").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Au revoir!");

    server
        .get("/phrase/search")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wildcard_origin_without_credentials() {
    let config = ServerConfig {
        enable_cors: true,
        ..ServerConfig::for_testing()
    };
    let server = create_app_server(config).await;

    let response = server
        .method(Method::OPTIONS, "/phrase/search")
        .add_header(ORIGIN, HeaderValue::from_static("http://anywhere.example"))
        .add_header(REQUEST_METHOD, HeaderValue::from_static("GET"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .is_none()
    );
}
