//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and business rules. Services receive the store adapter as an injected
//! dependency and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_reserver::CodeReserver`] - Custom alias checks and unique code generation
//! - [`services::link_service::LinkService`] - Short link creation and deletion
//! - [`services::resolution_service::ResolutionService`] - Redirect resolution with click tracking
//! - [`services::stats_service::StatsService`] - Read-only link statistics

pub mod services;
