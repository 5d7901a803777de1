//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of `short_url -> original_url` mappings.
///
/// Sits in front of [`crate::domain::repositories::LinkRepository::find_by_short_url`].
/// Lookups are fail-open: a broken cache degrades to store lookups and never
/// changes what a short URL resolves to. Entries must be invalidated when the
/// link is deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached original URL for a short URL.
    ///
    /// `Ok(None)` on a miss.
    async fn get_original_url(&self, short_url: &str) -> CacheResult<Option<String>>;

    /// Stores a mapping, using the implementation's default TTL when `ttl_seconds` is `None`.
    async fn set_original_url(
        &self,
        short_url: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a mapping after its link was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::OperationError`] if the backend could not drop the key.
    async fn invalidate(&self, short_url: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn name(&self) -> &'static str;
}
