//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::response::ApiResponse;
use crate::api::dto::shorten::{ShortenData, ShortenRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;
use crate::utils::code_generator::validate_custom_alias;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a/b",
///   "customAlias": "docs-1",               // optional
///   "expiresAt": "2030-01-01T00:00:00Z"    // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "originalUrl": "https://example.com/a/b",
///     "shortUrl": "https://s.example.com/docs-1",
///     "shortCode": "docs-1",
///     "customAlias": true,
///     "expiresAt": "2030-01-01T00:00:00Z",
///     "createdAt": "2025-06-01T12:00:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or fails validation.
/// Returns 409 Conflict if the custom alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ShortenData>>), AppError> {
    let Json(payload) = payload?;

    payload.validate()?;
    payload.ensure_http_url()?;
    let expires_at = payload.parse_expires_at(Utc::now())?;
    if let Some(alias) = payload.custom_alias.as_deref() {
        validate_custom_alias(alias, state.policy())?;
    }

    let base_url = resolve_base_url(&headers, state.public_base_url.as_deref())?;

    let created = state
        .link_service
        .create_short_link(
            payload.original_url,
            payload.custom_alias,
            expires_at,
            &base_url,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ShortenData::from(created))),
    ))
}
