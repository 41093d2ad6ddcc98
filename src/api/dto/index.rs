//! DTO for the service index.

use serde::Serialize;
use std::collections::BTreeMap;

/// Service name, version and a map of the public endpoints.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}
