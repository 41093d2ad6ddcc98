//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Service index
//! - `GET  /health`    - Health check
//! - `GET  /{code}`    - Short link redirect
//! - `/api/*`          - REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, the API is meant to be called from browsers
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `config` - rate limit settings are read from here
///
/// # Errors
///
/// Returns an error if rate limiting is enabled with zero limits.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let mut api_router = api::routes::api_routes();
    if config.rate_limit_enabled {
        api_router = api_router.layer(rate_limit::layer(
            config.rate_limit_period_secs,
            config.rate_limit_burst,
        )?);
    }

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
