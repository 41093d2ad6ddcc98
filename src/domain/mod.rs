//! Domain layer containing business entities and store contracts.
//!
//! This module defines the short link entity and the repository interface the
//! services depend on. It has no knowledge of HTTP or of any concrete storage
//! engine.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Consistency Contract
//!
//! The store is the single source of truth. Services never cache records and
//! never take locks of their own:
//!
//! 1. Short code uniqueness is enforced by the store on insert
//! 2. Click tracking is one atomic increment-and-touch operation
//! 3. Deletion is an atomic find-and-remove

pub mod entities;
pub mod repositories;
