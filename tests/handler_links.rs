mod common;

use axum::{
    Router,
    routing::{delete, get},
};
use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::api::handlers::{delete_link_handler, redirect_handler, stats_handler};
use snaplink::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/api/stats/{code}", get(stats_handler))
        .route("/api/url/{code}", delete(delete_link_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_delete_link_success() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_test_link(&repo, "docs-1", "https://example.com/a/b").await;

    let response = server.delete("/api/url/docs-1").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "success": true,
        "message": "Short URL deleted successfully",
        "data": {
            "shortCode": "docs-1",
            "originalUrl": "https://example.com/a/b"
        }
    }));

    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_deleted_link_is_gone_everywhere() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_test_link(&repo, "docs-1", "https://example.com").await;

    server.delete("/api/url/docs-1").await.assert_status_ok();

    server.get("/docs-1").await.assert_status_not_found();
    server.get("/api/stats/docs-1").await.assert_status_not_found();
    server.delete("/api/url/docs-1").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_expired_link() {
    let (state, repo) = common::create_test_state();
    let server = server(state);

    common::create_expired_link(&repo, "old-one", "https://example.com").await;

    server.delete("/api/url/old-one").await.assert_status_ok();
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let (state, _repo) = common::create_test_state();
    let server = server(state);

    let response = server.delete("/api/url/nope12").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"], "Short URL not found");
}
