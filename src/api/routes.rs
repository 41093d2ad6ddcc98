//! API route configuration.

use crate::api::handlers::{delete_link_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`       - Create a short URL
/// - `GET    /stats/{code}`  - Statistics for a specific link
/// - `DELETE /url/{code}`    - Delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/url/{code}", delete(delete_link_handler))
}
