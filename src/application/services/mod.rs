//! Business logic services for the application layer.

pub mod code_reserver;
pub mod link_service;
pub mod resolution_service;
pub mod stats_service;

pub use code_reserver::CodeReserver;
pub use link_service::{CreatedLink, DeletedLink, LinkService};
pub use resolution_service::ResolutionService;
pub use stats_service::{LinkStats, StatsService};
