//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::StoreError;

/// Name of the unique constraint on `short_links.short_code`.
const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

/// Row shape of the `short_links` table.
#[derive(Debug, sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    short_code: String,
    original_url: String,
    is_custom_alias: bool,
    clicks: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    last_accessed_at: Option<DateTime<Utc>>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            short_code: row.short_code,
            original_url: row.original_url,
            is_custom_alias: row.is_custom_alias,
            clicks: row.clicks,
            created_at: row.created_at,
            expires_at: row.expires_at,
            last_accessed_at: row.last_accessed_at,
        }
    }
}

/// Returns true if `e` is a unique violation on the short code column.
fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::UniqueViolation;
    }

    StoreError::Backend(e.to_string())
}

/// PostgreSQL repository for short links.
///
/// Uses bound parameters for every query; no SQL is built from user input.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, short_code, original_url, is_custom_alias, clicks,
                   created_at, expires_at, last_accessed_at
            FROM short_links
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (short_code, original_url, is_custom_alias, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, short_code, original_url, is_custom_alias, clicks,
                      created_at, expires_at, last_accessed_at
            "#,
        )
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(new_link.is_custom_alias)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn increment_clicks(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1, last_accessed_at = $2
            WHERE short_code = $1
            RETURNING id, short_code, original_url, is_custom_alias, clicks,
                      created_at, expires_at, last_accessed_at
            "#,
        )
        .bind(code)
        .bind(accessed_at)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn delete_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            DELETE FROM short_links
            WHERE short_code = $1
            RETURNING id, short_code, original_url, is_custom_alias, clicks,
                      created_at, expires_at, last_accessed_at
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
