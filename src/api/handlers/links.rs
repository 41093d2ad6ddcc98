//! Handler for link deletion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::DeletedLinkData;
use crate::api::dto::response::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_short_code;

/// Permanently deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/url/{code}`
///
/// # Behavior
///
/// - The record is removed from the store; statistics are gone with it.
/// - Subsequent redirects and stats requests for this code return 404.
/// - The code can be taken again by a new link right away.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 400 Bad Request if the code is malformed.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DeletedLinkData>>, AppError> {
    validate_short_code(&code, state.policy())?;

    let deleted = state.link_service.delete_link(&code).await?;

    Ok(Json(ApiResponse::with_message(
        "Short URL deleted successfully",
        DeletedLinkData::from(deleted),
    )))
}
