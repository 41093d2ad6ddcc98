//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short code mapped to its original URL, with click statistics
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - [`NewShortLink`] - Data written by the shortening service on insert

pub mod link;

pub use link::{NewShortLink, ShortLink};
