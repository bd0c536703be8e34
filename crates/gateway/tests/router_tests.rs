//! Router wiring tests that do not require a running database.
//!
//! The MongoDB client connects lazily, so building the state and serving
//! routes that never touch the store works against an unreachable URL.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use roster_gateway::{create_router, GatewayState};
use tower::ServiceExt;

async fn test_router() -> axum::Router {
    let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .unwrap();
    let database = client.database("roster_router_tests");
    let state = GatewayState::new(&database, "router-test-secret").unwrap();
    create_router(state)
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_rejects_get() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn blank_token_secret_is_rejected() {
    let client = mongodb::Client::with_uri_str("mongodb://127.0.0.1:27017")
        .await
        .unwrap();
    let database = client.database("roster_router_tests");

    assert!(GatewayState::new(&database, "").is_err());
}
