//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable mapping between original URLs and short URLs, queryable by either key.
///
/// Every method is a single statement against the backing store, so each one
/// is atomic with respect to concurrent callers. The store's unique
/// constraints on `original_url` and `short_url` are what keep concurrent
/// creators from minting two links for the same URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Duplicate`] if either the original URL or the short
    /// URL already exists; the existing record is never overwritten.
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its exact original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its exact, fully-qualified short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Hard-deletes a link by id.
    ///
    /// Returns the removed link, or `Ok(None)` if no link had that id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn delete_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
