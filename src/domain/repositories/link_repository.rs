//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store adapter for short links.
///
/// Every method is a single store operation. Implementations must make
/// [`insert`](Self::insert), [`increment_clicks`](Self::increment_clicks) and
/// [`delete_by_code`](Self::delete_by_code) atomic per short code; the
/// services rely on that and perform no locking themselves.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryLinkRepository`] - Process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the store is unreachable.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the short code is already
    /// taken. An existing record is never overwritten.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Atomically increments `clicks` by one and sets `last_accessed_at`.
    ///
    /// Returns the updated record, or `Ok(None)` if no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the store is unreachable.
    async fn increment_clicks(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, StoreError>;

    /// Atomically removes a link and returns the removed record.
    ///
    /// Returns `Ok(None)` if no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the store is unreachable.
    async fn delete_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the store is unreachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
