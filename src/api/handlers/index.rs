//! Handler for the service index.

use axum::Json;
use std::collections::BTreeMap;

use crate::api::dto::index::IndexResponse;

/// Lists the public endpoints.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        ("POST /api/shorten", "Create a short URL"),
        ("GET /{shortCode}", "Redirect to original URL"),
        ("GET /api/stats/{shortCode}", "Get URL statistics"),
        ("DELETE /api/url/{shortCode}", "Delete a short URL"),
        ("GET /health", "Service health"),
    ]);

    Json(IndexResponse {
        message: "URL Shortener API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}
