//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP rate limiter layer for the API.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter that refills one token every `period_secs` seconds,
/// holding at most `burst`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the socket
/// peer address, so the server must be started with connect info.
///
/// # Errors
///
/// Returns an error if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::layer(2, 100)?);
/// ```
pub fn layer(period_secs: u64, burst: u32) -> Result<RateLimitLayer> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(period_secs)
            .burst_size(burst)
            .finish()
            .context("Rate limit period and burst size must be greater than 0")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_accepts_positive_values() {
        assert!(layer(2, 100).is_ok());
    }

    #[test]
    fn test_layer_rejects_zero_burst() {
        assert!(layer(2, 0).is_err());
    }

    #[test]
    fn test_layer_rejects_zero_period() {
        assert!(layer(0, 100).is_err());
    }
}
