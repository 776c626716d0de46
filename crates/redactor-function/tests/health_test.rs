mod helpers;

use helpers::setup_test_app;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app(&[]).await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_test_app(&[]).await;

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "req-123")
        .await;

    assert_eq!(response.header("X-Request-ID"), "req-123");
}

#[tokio::test]
async fn test_cloud_event_id_becomes_request_id() {
    let app = setup_test_app(&[]).await;

    let response = app
        .client()
        .get("/health")
        .add_header("ce-id", "1234567890")
        .await;

    assert_eq!(response.header("X-Request-ID"), "1234567890");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_test_app(&[]).await;

    let response = app.client().get("/nope").expect_failure().await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<serde_json::Value>()["code"], "NOT_FOUND");
}
