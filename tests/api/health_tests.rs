//! Health Check API Tests
//!
//! The health endpoint is stateless, so these run without any backing
//! services by routing to the handler directly.

use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
use tower::ServiceExt;

use conversation_server::presentation::http::handlers::health::health_check;

fn health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check returns 200 OK
#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_router()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Health check reports status and version
#[tokio::test]
async fn health_check_reports_status_and_version() {
    let response = health_router()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
