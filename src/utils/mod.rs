//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`base_url`] - Public base URL derivation from HTTP headers

pub mod base_url;
pub mod code_generator;
