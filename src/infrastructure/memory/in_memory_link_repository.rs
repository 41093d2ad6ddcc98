//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::StoreError;

#[derive(Default)]
struct Store {
    links: HashMap<String, ShortLink>,
    next_id: i64,
}

/// Short link store backed by a `HashMap` behind a [`RwLock`].
///
/// Each write holds the lock for the whole operation, which gives the same
/// per-code atomicity the PostgreSQL repository gets from single statements.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    store: RwLock<Store>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.store.read().await.links.len()
    }

    /// Returns true if no links are stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.store.read().await.links.get(code).cloned())
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let id = store.next_id;

        match store.links.entry(new_link.short_code.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation),
            Entry::Vacant(slot) => Ok(slot.insert(new_link.into_link(id)).clone()),
        }
    }

    async fn increment_clicks(
        &self,
        code: &str,
        accessed_at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, StoreError> {
        let mut store = self.store.write().await;

        Ok(store.links.get_mut(code).map(|link| {
            link.clicks += 1;
            link.last_accessed_at = Some(accessed_at);
            link.clone()
        }))
    }

    async fn delete_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.store.write().await.links.remove(code))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(code: &str) -> NewShortLink {
        NewShortLink {
            short_code: code.to_string(),
            original_url: format!("https://example.com/{}", code),
            is_custom_alias: false,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryLinkRepository::new();

        let created = repo.insert(new_link("abc123")).await.unwrap();
        let found = repo.find_by_code("abc123").await.unwrap();

        assert_eq!(found, Some(created));
        assert!(repo.find_by_code("zzz999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_code_rejected() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(new_link("abc123")).await.unwrap();

        let mut duplicate = new_link("abc123");
        duplicate.original_url = "https://other.com".to_string();
        let result = repo.insert(duplicate).await;

        assert!(matches!(result, Err(StoreError::UniqueViolation)));
        let kept = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(kept.original_url, "https://example.com/abc123");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(new_link("abc123")).await.unwrap();
        let at = Utc::now();

        let updated = repo.increment_clicks("abc123", at).await.unwrap().unwrap();

        assert_eq!(updated.clicks, 1);
        assert_eq!(updated.last_accessed_at, Some(at));
        assert!(repo.increment_clicks("missing", at).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        repo.insert(new_link("hot123")).await.unwrap();

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_clicks("hot123", Utc::now()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let link = repo.find_by_code("hot123").await.unwrap().unwrap();
        assert_eq!(link.clicks, 100);
    }

    #[tokio::test]
    async fn test_delete_frees_code() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(new_link("abc123")).await.unwrap();

        let removed = repo.delete_by_code("abc123").await.unwrap();
        assert!(removed.is_some());
        assert!(repo.delete_by_code("abc123").await.unwrap().is_none());
        assert!(repo.is_empty().await);

        assert!(repo.insert(new_link("abc123")).await.is_ok());
    }
}
