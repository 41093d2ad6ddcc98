//! DTOs for link shortening endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use url::Url;
use validator::Validate;

use crate::application::services::CreatedLink;
use crate::error::AppError;

/// Characters a custom alias may use. Length is checked against the policy.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias pattern is valid"));

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Please provide a valid URL with http or https protocol"))]
    pub original_url: String,

    /// Optional custom short code (checked against the configured alias policy).
    #[validate(regex(
        path = "*ALIAS_REGEX",
        message = "Custom alias can only contain letters, numbers, hyphens, and underscores"
    ))]
    pub custom_alias: Option<String>,

    /// Optional ISO 8601 expiry timestamp, must lie in the future.
    pub expires_at: Option<String>,
}

impl ShortenRequest {
    /// Checks that the URL uses `http` or `https` and has a host.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for any other scheme.
    pub fn ensure_http_url(&self) -> Result<(), AppError> {
        let parsed = Url::parse(&self.original_url).map_err(|e| {
            AppError::bad_request(
                "Please provide a valid URL with http or https protocol",
                json!({ "field": "originalUrl", "reason": e.to_string() }),
            )
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(AppError::bad_request(
                "Please provide a valid URL with http or https protocol",
                json!({ "field": "originalUrl", "scheme": parsed.scheme() }),
            ));
        }

        Ok(())
    }

    /// Parses `expires_at` and checks that it is later than `now`.
    ///
    /// Accepts RFC 3339 timestamps, offset-less date-times (read as UTC) and
    /// plain dates (midnight UTC).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the value is not ISO 8601 or is not
    /// in the future.
    pub fn parse_expires_at(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, AppError> {
        let Some(raw) = self.expires_at.as_deref() else {
            return Ok(None);
        };

        let expires_at = parse_iso8601(raw).ok_or_else(|| {
            AppError::bad_request(
                "Expiration date must be a valid ISO 8601 date",
                json!({ "field": "expiresAt", "value": raw }),
            )
        })?;

        if expires_at <= now {
            return Err(AppError::bad_request(
                "Expiration date must be in the future",
                json!({ "field": "expiresAt", "value": raw }),
            ));
        }

        Ok(Some(expires_at))
    }
}

fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Created link as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenData {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub custom_alias: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CreatedLink> for ShortenData {
    fn from(created: CreatedLink) -> Self {
        let CreatedLink { link, short_url } = created;
        Self {
            original_url: link.original_url,
            short_url,
            short_code: link.short_code,
            custom_alias: link.is_custom_alias,
            expires_at: link.expires_at,
            created_at: link.created_at,
        }
    }
}
