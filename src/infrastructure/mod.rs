//! Infrastructure layer for external integrations.
//!
//! This layer implements the store adapter defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementation
//! - [`memory`] - Process-local repository for development and tests

pub mod memory;
pub mod persistence;
