#![allow(dead_code)]

use chrono::{DateTime, Utc};
use snaplink::config::LinkPolicy;
use snaplink::domain::entities::{NewShortLink, ShortLink};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::memory::InMemoryLinkRepository;
use snaplink::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "https://s.example.com";

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    create_test_state_with_policy(LinkPolicy::default())
}

pub fn create_test_state_with_policy(
    policy: LinkPolicy,
) -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let repository: Arc<dyn LinkRepository> = repo.clone();

    let state = AppState::new(repository, policy, Some(BASE_URL.to_string()));

    (state, repo)
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) -> ShortLink {
    insert_link(repo, code, url, Utc::now(), None).await
}

pub async fn create_expired_link(
    repo: &InMemoryLinkRepository,
    code: &str,
    url: &str,
) -> ShortLink {
    let now = Utc::now();
    insert_link(
        repo,
        code,
        url,
        now - chrono::Duration::days(2),
        Some(now - chrono::Duration::hours(1)),
    )
    .await
}

pub async fn insert_link(
    repo: &InMemoryLinkRepository,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
) -> ShortLink {
    repo.insert(NewShortLink {
        short_code: code.to_string(),
        original_url: url.to_string(),
        is_custom_alias: true,
        created_at,
        expires_at,
    })
    .await
    .unwrap()
}

pub async fn get_link(repo: &InMemoryLinkRepository, code: &str) -> Option<ShortLink> {
    repo.find_by_code(code).await.unwrap()
}
