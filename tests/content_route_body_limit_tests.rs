mod common;

use axum::http::StatusCode;
use common::{body_json, json_request, test_app};
use copydesk::config::Config;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn content_route_returns_413_for_oversized_body() {
    let cfg = Config {
        body_limit_bytes: 16 * 1024,
        ..Config::default()
    };
    let (app, store, _db) = test_app("body-limit", cfg).await;

    let oversized = "a".repeat(32 * 1024);
    let body = json!({ "section": "hero", "key": "title", "value": oversized });

    let resp = app
        .oneshot(json_request(
            "PUT",
            "/api/content",
            &body,
            Some(("admin", "admin123")),
        ))
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "request body too large");

    let title = store.find_content("hero", "title").await.unwrap().unwrap();
    assert_eq!(title.value, "A Lead Generation Powerhouse");
}
