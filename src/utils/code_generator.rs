//! Short code generation and validation utilities.
//!
//! Provides cryptographically secure random code generation and shape checks
//! for custom aliases and short codes received in request paths.

use crate::config::LinkPolicy;
use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Codes that collide with service routes and can never be short links.
pub const RESERVED_CODES: &[&str] = &["api", "health"];

/// Generates a cryptographically secure random short code.
///
/// Every character is drawn uniformly from the URL-safe alphabet
/// `[A-Za-z0-9_-]`: enough OS entropy is base64-encoded (URL-safe, no
/// padding) that the first `length` characters each carry six full random
/// bits, and the rest is discarded.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code(length: usize) -> Result<String, getrandom::Error> {
    let mut buffer = vec![0u8; (length * 6).div_ceil(8)];

    getrandom::fill(&mut buffer)?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(length);
    Ok(code)
}

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Returns true if `code` is a reserved route name.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code))
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: `policy.alias_min_length..=policy.alias_max_length` (default 4-10)
/// - Allowed characters: letters, digits, hyphens, underscores
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
pub fn validate_custom_alias(alias: &str, policy: &LinkPolicy) -> Result<(), AppError> {
    let len = alias.chars().count();
    if len < policy.alias_min_length || len > policy.alias_max_length {
        return Err(AppError::bad_request(
            format!(
                "Custom alias must be between {} and {} characters",
                policy.alias_min_length, policy.alias_max_length
            ),
            json!({ "field": "customAlias", "provided_length": len }),
        ));
    }

    if !alias.chars().all(is_code_char) {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, numbers, hyphens, and underscores",
            json!({ "field": "customAlias", "value": alias }),
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "field": "customAlias", "value": alias }),
        ));
    }

    Ok(())
}

/// Validates the shape of a short code taken from a request path.
///
/// Accepts both generated codes and custom aliases, so the length window is
/// the union of the two policies.
///
/// # Errors
///
/// Returns [`AppError::Validation`] on bad length or characters.
pub fn validate_short_code(code: &str, policy: &LinkPolicy) -> Result<(), AppError> {
    let len = code.chars().count();
    let (min, max) = (policy.min_code_length(), policy.max_code_length());

    if len < min || len > max {
        return Err(AppError::bad_request(
            format!("Short code must be between {} and {} characters", min, max),
            json!({ "field": "shortCode", "provided_length": len }),
        ));
    }

    if !code.chars().all(is_code_char) {
        return Err(AppError::bad_request(
            "Short code can only contain letters, numbers, hyphens, and underscores",
            json!({ "field": "shortCode", "value": code }),
        ));
    }

    Ok(())
}
