//! Short code resolution with click tracking.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service that turns a short code into its redirect target.
///
/// Every successful resolution is counted with one atomic store update, so
/// concurrent resolutions of the same code never lose clicks.
pub struct ResolutionService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> ResolutionService<R> {
    /// Creates a new resolution service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves a short code to its original URL and records the click.
    ///
    /// Expired links are rejected without touching their statistics.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown, including when the link
    ///   was deleted between lookup and click update
    /// - [`AppError::Expired`] if the link is past its `expires_at`
    /// - [`AppError::Storage`] on store failures
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let Some(link) = self.repository.find_by_code(code).await? else {
            metrics::counter!("shortlinks_redirects_total", "outcome" => "not_found").increment(1);
            return Err(AppError::not_found(code));
        };

        let now = Utc::now();
        if link.is_expired_at(now) {
            tracing::debug!(code = %code, expires_at = ?link.expires_at, "Short link expired");
            metrics::counter!("shortlinks_redirects_total", "outcome" => "expired").increment(1);
            return Err(AppError::Expired {
                code: code.to_string(),
            });
        }

        let updated = self
            .repository
            .increment_clicks(code, now)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        tracing::debug!(code = %code, clicks = updated.clicks, "Short link resolved");
        metrics::counter!("shortlinks_redirects_total", "outcome" => "ok").increment(1);

        Ok(updated.original_url)
    }
}
