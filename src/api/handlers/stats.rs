//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::response::ApiResponse;
use crate::api::dto::stats::StatsData;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_short_code;

/// Retrieves statistics for a specific short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "originalUrl": "https://example.com",
///     "shortCode": "abc123",
///     "customAlias": false,
///     "clicks": 42,
///     "createdAt": "2025-06-01T12:00:00Z",
///     "lastAccessedAt": "2025-06-02T08:30:00Z",
///     "expiresAt": null,
///     "isExpired": false
///   }
/// }
/// ```
///
/// Reading statistics never counts as a click. Expired links are reported
/// with `isExpired: true` rather than an error.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if the code is malformed.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<StatsData>>, AppError> {
    validate_short_code(&code, state.policy())?;

    let stats = state.stats_service.get_stats(&code).await?;

    Ok(Json(ApiResponse::ok(StatsData::from(stats))))
}
