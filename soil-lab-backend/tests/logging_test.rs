// tests/logging_test.rs

mod common;

use axum::http::StatusCode;
use common::app_helper::setup_app;
use common::auth_helper::token_for;
use common::test_data::{populated_store, HQ};
use soil_lab_backend::domain::role_model::Role;
use soil_lab_backend::log_with_context;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_structured_logging_macro() {
    common::init_test_env();

    log_with_context!(tracing::Level::INFO, "Test message without context");

    let organization_id = 7;
    log_with_context!(
        tracing::Level::INFO,
        "Test message with context",
        "actor_uid" => "uid-1",
        "organization_id" => organization_id,
        "operation" => "test"
    );

    log_with_context!(
        tracing::Level::ERROR,
        "Error occurred during test",
        "error" => "Test error",
        "organization_id" => organization_id
    );

    log_with_context!(
        tracing::Level::WARN,
        "Warning during test",
        "reason" => "organization_out_of_scope"
    );

    log_with_context!(
        tracing::Level::DEBUG,
        "Debug information",
        "accessible" => vec![1, 2, 3]
    );
}

#[tokio::test]
async fn test_logging_middleware_integration() {
    use axum::{routing::get, Router};

    common::init_test_env();

    let app = Router::new()
        .route("/test", get(|| async { "Test response" }))
        .route(
            "/error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .layer(axum::middleware::from_fn(
            soil_lab_backend::logging::logging_middleware,
        ))
        .layer(axum::middleware::from_fn(
            soil_lab_backend::logging::inject_request_context,
        ));

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr).await.unwrap();
    let actual_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .unwrap();
    });

    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/test", actual_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("http://{}/error", actual_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn test_request_context_generation() {
    use axum::{extract::Extension, routing::get, Router};
    use soil_lab_backend::logging::RequestContext;

    let app = Router::new()
        .route(
            "/context-test",
            get(|Extension(context): Extension<RequestContext>| async move {
                assert!(!context.request_id.is_empty());
                assert_eq!(context.path, "/context-test");
                assert_eq!(context.method, "GET");

                "Context test passed"
            }),
        )
        .layer(axum::middleware::from_fn(
            soil_lab_backend::logging::inject_request_context,
        ));

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr).await.unwrap();
    let actual_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .unwrap();
    });

    let response = reqwest::Client::new()
        .get(format!("http://{}/context-test", actual_addr))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Context test passed");
}

#[tokio::test]
async fn test_full_stack_over_tcp() {
    let app = setup_app(populated_store());
    let token = token_for(&app.jwt_manager, Role::Viewer, Some(HQ));

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let actual_addr = listener.local_addr().unwrap();
    let router = app.router;

    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/organizations/accessible", actual_addr))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["organization_ids"], serde_json::json!([1, 2, 3, 4]));
}
