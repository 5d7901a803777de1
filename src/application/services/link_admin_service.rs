//! Administrative listing and deletion of links.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service behind the admin page and the admin API.
///
/// Deletion is a hard delete: the record is gone and its short URL resolves
/// to NotFound immediately, including through the cache.
pub struct LinkAdminService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
}

impl<L: LinkRepository + ?Sized> LinkAdminService<L> {
    pub fn new(link_repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            link_repository,
            cache,
        }
    }

    /// Lists all links, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Total number of links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Deletes a link by id and drops its cache entry.
    ///
    /// Returns the deleted link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn delete_link(&self, id: i64) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if let Err(e) = self.cache.invalidate(&link.short_url).await {
            warn!(
                id,
                short_url = %link.short_url,
                error = %e,
                "Failed to invalidate cache after delete"
            );
        }

        info!(id, short_url = %link.short_url, "Deleted link");

        Ok(link)
    }
}
