//! Short link creation and deletion service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::services::CodeReserver;
use crate::config::LinkPolicy;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, StoreError};
use crate::utils::base_url::short_url;

/// A freshly created link together with its public short URL.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: ShortLink,
    pub short_url: String,
}

/// What remains of a link after deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedLink {
    pub short_code: String,
    pub original_url: String,
}

/// Service for creating and deleting short links.
///
/// Inputs are expected to be shape-validated by the HTTP layer. The service
/// owns uniqueness: it reserves a code, inserts, and treats a unique
/// constraint rejection from the store as authoritative.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    reserver: CodeReserver<R>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, policy: LinkPolicy) -> Self {
        Self {
            reserver: CodeReserver::new(repository.clone(), policy),
            repository,
        }
    }

    /// Policy used for code generation.
    pub fn policy(&self) -> &LinkPolicy {
        self.reserver.policy()
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - The redirect target (already validated as http/https)
    /// - `custom_alias` - Optional caller-chosen code; takes precedence over generation
    /// - `expires_at` - Optional expiry; `None` means the link never expires
    /// - `base_url` - `scheme://host` prefix for the returned short URL
    ///
    /// # Code Allocation
    ///
    /// - Custom alias: checked, then inserted. A unique violation on insert
    ///   (another request won the race) is reported as a conflict.
    /// - Generated: a free code is picked and inserted. A unique violation on
    ///   insert triggers a fresh code. Lookups and retries share
    ///   `max_generation_attempts`.
    ///
    /// # Errors
    ///
    /// - [`AppError::AliasConflict`] if the custom alias is taken
    /// - [`AppError::GenerationExhausted`] if no free code was found in time
    /// - [`AppError::Storage`] on store failures, which are never retried
    pub async fn create_short_link(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        base_url: &str,
    ) -> Result<CreatedLink, AppError> {
        let is_custom_alias = custom_alias.is_some();
        let mut remaining = self.policy().max_generation_attempts;

        loop {
            let code = match custom_alias.as_deref() {
                Some(alias) => self.reserver.reserve_custom(alias).await?,
                None => self.reserver.reserve_generated(&mut remaining).await?,
            };

            let new_link = NewShortLink {
                short_code: code,
                original_url: original_url.clone(),
                is_custom_alias,
                created_at: Utc::now(),
                expires_at,
            };

            match self.repository.insert(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        code = %link.short_code,
                        custom_alias = link.is_custom_alias,
                        expires_at = ?link.expires_at,
                        "Short link created"
                    );
                    metrics::counter!("shortlinks_created_total").increment(1);

                    let short_url = short_url(base_url, &link.short_code);
                    return Ok(CreatedLink { link, short_url });
                }
                Err(StoreError::UniqueViolation) => {
                    if let Some(alias) = custom_alias.as_ref() {
                        return Err(AppError::AliasConflict {
                            alias: alias.clone(),
                        });
                    }
                    tracing::debug!("Short code taken between check and insert, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Permanently deletes a short link.
    ///
    /// The code becomes available for new links immediately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<DeletedLink, AppError> {
        let link = self
            .repository
            .delete_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        tracing::info!(code = %link.short_code, clicks = link.clicks, "Short link deleted");
        metrics::counter!("shortlinks_deleted_total").increment(1);

        Ok(DeletedLink {
            short_code: link.short_code,
            original_url: link.original_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Duration;

    const BASE: &str = "https://s.example.com";

    fn stored(new_link: NewShortLink) -> ShortLink {
        new_link.into_link(10)
    }

    #[tokio::test]
    async fn test_create_short_link_generated() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .withf(|new_link| {
                new_link.short_code.len() == 6
                    && !new_link.is_custom_alias
                    && new_link.original_url == "https://example.com/a/b"
            })
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let created = service
            .create_short_link("https://example.com/a/b".to_string(), None, None, BASE)
            .await
            .unwrap();

        assert_eq!(created.link.clicks, 0);
        assert!(created.link.expires_at.is_none());
        assert_eq!(
            created.short_url,
            format!("{}/{}", BASE, created.link.short_code)
        );
    }

    #[tokio::test]
    async fn test_create_short_link_with_custom_alias() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "docs-1")
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.short_code == "docs-1" && new_link.is_custom_alias)
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let created = service
            .create_short_link(
                "https://example.com/a/b".to_string(),
                Some("docs-1".to_string()),
                None,
                BASE,
            )
            .await
            .unwrap();

        assert_eq!(created.link.short_code, "docs-1");
        assert!(created.link.is_custom_alias);
        assert_eq!(created.short_url, "https://s.example.com/docs-1");
    }

    #[tokio::test]
    async fn test_create_short_link_keeps_expiry() {
        let mut mock_repo = MockLinkRepository::new();
        let expires_at = Utc::now() + Duration::days(1);

        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .withf(move |new_link| new_link.expires_at == Some(expires_at))
            .times(1)
            .returning(|new_link| Ok(stored(new_link)));

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let created = service
            .create_short_link(
                "https://example.com".to_string(),
                None,
                Some(expires_at),
                BASE,
            )
            .await
            .unwrap();

        assert_eq!(created.link.expires_at, Some(expires_at));
    }

    #[tokio::test]
    async fn test_custom_alias_conflict_on_precheck() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|code| {
                Ok(Some(stored(NewShortLink {
                    short_code: code.to_string(),
                    original_url: "https://other.com".to_string(),
                    is_custom_alias: true,
                    created_at: Utc::now(),
                    expires_at: None,
                })))
            });
        mock_repo.expect_insert().times(0);

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let result = service
            .create_short_link(
                "https://example.com".to_string(),
                Some("taken".to_string()),
                None,
                BASE,
            )
            .await;

        assert!(matches!(result, Err(AppError::AliasConflict { .. })));
    }

    #[tokio::test]
    async fn test_custom_alias_conflict_on_insert_race() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::UniqueViolation));

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let result = service
            .create_short_link(
                "https://example.com".to_string(),
                Some("racey".to_string()),
                None,
                BASE,
            )
            .await;

        assert!(matches!(result, Err(AppError::AliasConflict { alias }) if alias == "racey"));
    }

    #[tokio::test]
    async fn test_generated_code_retried_after_insert_violation() {
        let mut mock_repo = MockLinkRepository::new();
        let mut inserts = 0;

        mock_repo
            .expect_find_by_code()
            .times(2)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .times(2)
            .returning(move |new_link| {
                inserts += 1;
                if inserts == 1 {
                    Err(StoreError::UniqueViolation)
                } else {
                    Ok(stored(new_link))
                }
            });

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let result = service
            .create_short_link("https://example.com".to_string(), None, None, BASE)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_insert_violations_exhaust_budget() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(2)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .times(2)
            .returning(|_| Err(StoreError::UniqueViolation));

        let policy = LinkPolicy {
            max_generation_attempts: 2,
            ..LinkPolicy::default()
        };
        let service = LinkService::new(Arc::new(mock_repo), policy);

        let result = service
            .create_short_link("https://example.com".to_string(), None, None, BASE)
            .await;

        assert!(matches!(
            result,
            Err(AppError::GenerationExhausted { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn test_store_outage_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(StoreError::Backend("connection reset".to_string())));

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let result = service
            .create_short_link("https://example.com".to_string(), None, None, BASE)
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_delete_by_code()
            .withf(|code| code == "docs-1")
            .times(1)
            .returning(|code| {
                Ok(Some(stored(NewShortLink {
                    short_code: code.to_string(),
                    original_url: "https://example.com/a/b".to_string(),
                    is_custom_alias: true,
                    created_at: Utc::now(),
                    expires_at: None,
                })))
            });

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let deleted = service.delete_link("docs-1").await.unwrap();

        assert_eq!(
            deleted,
            DeletedLink {
                short_code: "docs-1".to_string(),
                original_url: "https://example.com/a/b".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_delete_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo), LinkPolicy::default());

        let result = service.delete_link("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
