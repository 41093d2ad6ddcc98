mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::Value;
use snaplink::api::handlers::{redirect_handler, stats_handler};
use snaplink::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/api/stats/{code}", get(stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_stats_fresh_link() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_test_link(&repo, "docs-1", "https://example.com/a/b").await;

    let response = server.get("/api/stats/docs-1").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert_eq!(data["originalUrl"], "https://example.com/a/b");
    assert_eq!(data["shortCode"], "docs-1");
    assert_eq!(data["customAlias"], true);
    assert_eq!(data["clicks"], 0);
    assert!(data["createdAt"].is_string());
    assert!(data["lastAccessedAt"].is_null());
    assert!(data["expiresAt"].is_null());
    assert_eq!(data["isExpired"], false);
}

#[tokio::test]
async fn test_stats_after_redirects() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_test_link(&repo, "docs-1", "https://example.com").await;

    server.get("/docs-1").await;
    server.get("/docs-1").await;

    let json = server.get("/api/stats/docs-1").await.json::<Value>();
    assert_eq!(json["data"]["clicks"], 2);
    assert!(json["data"]["lastAccessedAt"].is_string());
}

#[tokio::test]
async fn test_stats_is_read_only() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_test_link(&repo, "docs-1", "https://example.com").await;

    let first = server.get("/api/stats/docs-1").await.json::<Value>();
    let second = server.get("/api/stats/docs-1").await.json::<Value>();

    assert_eq!(first, second);
    assert_eq!(second["data"]["clicks"], 0);
}

#[tokio::test]
async fn test_stats_expired_link() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_expired_link(&repo, "old-one", "https://example.com").await;

    let response = server.get("/api/stats/old-one").await;

    response.assert_status_ok();

    let data = &response.json::<Value>()["data"];
    assert_eq!(data["isExpired"], true);
    assert!(data["expiresAt"].is_string());
}

#[tokio::test]
async fn test_stats_future_expiry_not_expired() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    let now = Utc::now();
    common::insert_link(
        &repo,
        "later1",
        "https://example.com",
        now,
        Some(now + Duration::days(1)),
    )
    .await;

    let data = server.get("/api/stats/later1").await.json::<Value>()["data"].clone();
    assert_eq!(data["isExpired"], false);
}

#[tokio::test]
async fn test_stats_not_found() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/stats/nope12").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"], "Short URL not found");
}
