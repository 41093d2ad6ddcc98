//! Error types shared by the store adapters, services and HTTP handlers.
//!
//! [`StoreError`] is what a [`crate::domain::repositories::LinkRepository`]
//! reports. [`AppError`] is the service-level taxonomy; each variant maps to a
//! fixed HTTP status and a fixed `{error, message}` body so callers can tell
//! failure kinds apart without ever seeing internal error text.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Failure reported by a store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code is already taken (unique constraint rejected the write).
    #[error("short code already exists")]
    UniqueViolation,

    /// Connectivity loss, timeout or any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Service-level error with a stable HTTP mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Custom alias '{alias}' already exists")]
    AliasConflict { alias: String },

    #[error("Short code '{code}' not found")]
    NotFound { code: String },

    #[error("Short code '{code}' has expired")]
    Expired { code: String },

    #[error("Failed to generate a unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("{message}")]
    Internal { message: String },
}

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::AliasConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::GenerationExhausted { .. }
            | AppError::Storage(_)
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing body. Server-side failures get generic text.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            AppError::Validation { message, details } => ErrorBody {
                error: "Validation failed",
                message: message.clone(),
                details: Some(details.clone()),
            },
            AppError::AliasConflict { .. } => ErrorBody {
                error: "Custom alias already exists",
                message: "Please choose a different custom alias".to_string(),
                details: None,
            },
            AppError::NotFound { .. } => ErrorBody {
                error: "Short URL not found",
                message: "The requested short URL does not exist".to_string(),
                details: None,
            },
            AppError::Expired { .. } => ErrorBody {
                error: "Short URL expired",
                message: "This short URL has expired and is no longer available".to_string(),
                details: None,
            },
            AppError::GenerationExhausted { .. } => ErrorBody {
                error: "Failed to create short URL",
                message: "Could not allocate a unique short code, please retry".to_string(),
                details: None,
            },
            AppError::Storage(_) | AppError::Internal { .. } => ErrorBody {
                error: "Internal server error",
                message: "An unexpected error occurred".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request(errors.to_string(), details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_alias_conflict_is_409() {
        let (status, body) = body_json(AppError::AliasConflict {
            alias: "docs-1".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Custom alias already exists");
        assert!(body["message"].is_string());
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_not_found_and_expired_are_distinct() {
        let (not_found, not_found_body) = body_json(AppError::not_found("abcd")).await;
        let (expired, expired_body) = body_json(AppError::Expired {
            code: "abcd".to_string(),
        })
        .await;

        assert_eq!(not_found, StatusCode::NOT_FOUND);
        assert_eq!(expired, StatusCode::GONE);
        assert_ne!(not_found_body["error"], expired_body["error"]);
    }

    #[tokio::test]
    async fn test_storage_error_does_not_leak_details() {
        let (status, body) = body_json(AppError::Storage(StoreError::Backend(
            "connection refused to 10.0.0.5:5432".to_string(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[tokio::test]
    async fn test_generation_exhausted_is_server_error() {
        let (status, _) = body_json(AppError::GenerationExhausted { attempts: 10 }).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_validation_error_carries_details() {
        let (status, body) = body_json(AppError::bad_request(
            "Custom alias must be between 4 and 10 characters",
            json!({ "provided_length": 2 }),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"]["provided_length"], 2);
    }

    #[test]
    fn test_store_error_converts_into_app_error() {
        let err: AppError = StoreError::UniqueViolation.into();
        assert!(matches!(err, AppError::Storage(StoreError::UniqueViolation)));
    }
}
