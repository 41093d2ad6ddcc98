//! Process-local repository implementations.
//!
//! Useful for local development without PostgreSQL and for tests. Data does
//! not survive a restart.

pub mod in_memory_link_repository;

pub use in_memory_link_repository::InMemoryLinkRepository;
