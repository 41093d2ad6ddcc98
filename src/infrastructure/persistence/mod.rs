//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Every
//! write is a single statement, so atomicity per short code comes from
//! PostgreSQL itself.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, click tracking and deletion

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
