//! Per-link statistics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Read-only projection of a short link for analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub original_url: String,
    pub short_code: String,
    pub is_custom_alias: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

/// Service for retrieving click statistics.
///
/// Never mutates a link: reading statistics does not count as a click.
/// Counts may trail a resolution that is still in flight.
pub struct StatsService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves statistics for a short code, expired links included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Storage`] on store failures.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        let is_expired = link.is_expired();

        Ok(LinkStats {
            original_url: link.original_url,
            short_code: link.short_code,
            is_custom_alias: link.is_custom_alias,
            clicks: link.clicks,
            created_at: link.created_at,
            last_accessed_at: link.last_accessed_at,
            expires_at: link.expires_at,
            is_expired,
        })
    }
}
