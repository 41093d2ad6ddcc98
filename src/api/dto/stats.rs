//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::LinkStats;

/// Statistics for a single short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub original_url: String,
    pub short_code: String,
    pub custom_alias: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

impl From<LinkStats> for StatsData {
    fn from(stats: LinkStats) -> Self {
        Self {
            original_url: stats.original_url,
            short_code: stats.short_code,
            custom_alias: stats.is_custom_alias,
            clicks: stats.clicks,
            created_at: stats.created_at,
            last_accessed_at: stats.last_accessed_at,
            expires_at: stats.expires_at,
            is_expired: stats.is_expired,
        }
    }
}
