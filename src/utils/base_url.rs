//! Public base URL derivation from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Returns the `scheme://host` prefix short URLs are built on.
///
/// A configured base URL always wins. Otherwise the prefix is derived from the
/// request: the scheme comes from `X-Forwarded-Proto` (defaulting to `http`)
/// and the authority from the `Host` header, port included.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base URL is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "sl.example.com:8080".parse().unwrap());
///
/// let base = resolve_base_url(&headers, None).unwrap();
/// assert_eq!(base, "http://sl.example.com:8080");
/// ```
pub fn resolve_base_url(headers: &HeaderMap, configured: Option<&str>) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| v.eq_ignore_ascii_case("https") || v.eq_ignore_ascii_case("http"))
        .unwrap_or("http")
        .to_ascii_lowercase();

    Ok(format!("{}://{}", scheme, host))
}

/// Joins a base URL and a short code.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
