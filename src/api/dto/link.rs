//! DTOs for link management endpoints.

use serde::Serialize;

use crate::application::services::DeletedLink;

/// Identity of a deleted link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedLinkData {
    pub short_code: String,
    pub original_url: String,
}

impl From<DeletedLink> for DeletedLinkData {
    fn from(deleted: DeletedLink) -> Self {
        Self {
            short_code: deleted.short_code,
            original_url: deleted.original_url,
        }
    }
}
