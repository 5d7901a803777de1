//! DTOs for the admin links API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// A stored link as exposed by `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkItem {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_url: link.short_url,
            created_at: link.created_at,
        }
    }
}
