//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link.
///
/// Both `original_url` and `short_url` are unique across the store. A link is
/// never mutated after creation; it only disappears through a hard delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    /// Fully-qualified short URL, e.g. `http://short.ly/Xy9`.
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_url,
            created_at,
        }
    }

    /// Returns the code part of the short URL (everything after the last `/`).
    pub fn code(&self) -> &str {
        self.short_url
            .rsplit_once('/')
            .map_or(self.short_url.as_str(), |(_, code)| code)
    }

    /// Creation time formatted for display, e.g. `2024-01-15 10:30:00`.
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Builds the fully-qualified short URL for a code: `http://{host}/{code}`.
///
/// A trailing `/` on the host is ignored.
pub fn compose_short_url(host: &str, code: &str) -> String {
    format!("http://{}/{}", host.trim_end_matches('/'), code)
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_url: String,
}
