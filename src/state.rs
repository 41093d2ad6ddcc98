//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, ResolutionService, StatsService};
use crate::config::LinkPolicy;
use crate::domain::repositories::LinkRepository;

/// Services and settings shared by all requests.
///
/// Cloning is cheap: every field is reference counted. All services share one
/// store adapter, which is the only place mutable state lives.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub resolution_service: Arc<ResolutionService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn LinkRepository>>,
    pub repository: Arc<dyn LinkRepository>,
    /// Fixed prefix for short URLs; derived from each request when `None`.
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Wires every service to the given store adapter.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        policy: LinkPolicy,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository.clone(), policy)),
            resolution_service: Arc::new(ResolutionService::new(repository.clone())),
            stats_service: Arc::new(StatsService::new(repository.clone())),
            repository,
            public_base_url,
        }
    }

    /// Policy for generated codes and custom aliases.
    pub fn policy(&self) -> &LinkPolicy {
        self.link_service.policy()
    }
}
