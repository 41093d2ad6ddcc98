//! Short link entity representing a code to URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its access statistics.
///
/// `short_code`, `original_url`, `is_custom_alias` and `created_at` never
/// change after creation. `clicks` and `last_accessed_at` are only touched by
/// the store's atomic increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub is_custom_alias: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Returns true if the link has passed its expiry time at `now`.
    ///
    /// A link without `expires_at` never expires. The boundary instant itself
    /// is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub short_code: String,
    pub original_url: String,
    pub is_custom_alias: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewShortLink {
    /// Materializes the record as stored, with zero clicks and no access yet.
    pub fn into_link(self, id: i64) -> ShortLink {
        ShortLink {
            id,
            short_code: self.short_code,
            original_url: self.original_url,
            is_custom_alias: self.is_custom_alias,
            clicks: 0,
            created_at: self.created_at,
            expires_at: self.expires_at,
            last_accessed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_expiring_at(expires_at: Option<DateTime<Utc>>) -> ShortLink {
        NewShortLink {
            short_code: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
            is_custom_alias: false,
            created_at: Utc::now(),
            expires_at,
        }
        .into_link(1)
    }

    #[test]
    fn test_new_link_starts_without_clicks() {
        let link = link_expiring_at(None);

        assert_eq!(link.id, 1);
        assert_eq!(link.short_code, "abc123");
        assert_eq!(link.clicks, 0);
        assert!(link.last_accessed_at.is_none());
        assert!(!link.is_custom_alias);
    }

    #[test]
    fn test_link_without_expiry_never_expires() {
        let link = link_expiring_at(None);

        assert!(!link.is_expired());
        assert!(!link.is_expired_at(Utc::now() + Duration::days(365 * 100)));
    }

    #[test]
    fn test_link_is_expired() {
        let link = link_expiring_at(Some(Utc::now() - Duration::seconds(1)));
        assert!(link.is_expired());
    }

    #[test]
    fn test_link_not_expired_before_deadline() {
        let link = link_expiring_at(Some(Utc::now() + Duration::hours(1)));
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_valid_at_exact_expiry_instant() {
        let deadline = Utc::now();
        let link = link_expiring_at(Some(deadline));

        assert!(!link.is_expired_at(deadline));
        assert!(link.is_expired_at(deadline + Duration::milliseconds(1)));
    }
}
