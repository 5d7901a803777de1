//! Short URL resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::compose_short_url;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, NullCache};

/// Resolves fully-qualified short URLs to their original URL.
///
/// Lookups go through an optional read-through cache. Cache failures are
/// logged and fall back to the store; they never change the outcome.
///
/// A cache fill can race with a delete that already invalidated the key, so
/// every fill is followed by a second store read. If the link is gone by then,
/// the entry is dropped again.
pub struct ResolveService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    cache_enabled: bool,
}

impl<L: LinkRepository + ?Sized> ResolveService<L> {
    pub fn new(link_repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        let cache_enabled = cache.name() != NullCache::NAME;
        Self {
            link_repository,
            cache,
            cache_enabled,
        }
    }

    /// Builds the short URL a request for `/{code}` on `host` refers to.
    pub fn short_url_for(&self, host: &str, code: &str) -> String {
        compose_short_url(host, code)
    }

    /// Returns the original URL behind `short_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this short URL.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn resolve(&self, short_url: &str) -> Result<String, AppError> {
        match self.cache.get_original_url(short_url).await {
            Ok(Some(original_url)) => {
                debug!(short_url, "Cache HIT");
                return Ok(original_url);
            }
            Ok(None) => debug!(short_url, "Cache MISS"),
            Err(e) => warn!(short_url, error = %e, "Cache lookup failed, falling back to store"),
        }

        let link = self
            .link_repository
            .find_by_short_url(short_url)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_url": short_url }))
            })?;

        if !self.cache_enabled {
            return Ok(link.original_url);
        }

        if let Err(e) = self
            .cache
            .set_original_url(&link.short_url, &link.original_url, None)
            .await
        {
            warn!(short_url, error = %e, "Failed to cache resolved link");
            return Ok(link.original_url);
        }

        match self.link_repository.find_by_short_url(short_url).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!(short_url, "Link deleted during cache fill, dropping entry");
                self.drop_entry(short_url).await;
                return Err(AppError::not_found(
                    "Short link not found",
                    json!({ "short_url": short_url }),
                ));
            }
            Err(e) => {
                self.drop_entry(short_url).await;
                return Err(e);
            }
        }

        Ok(link.original_url)
    }

    async fn drop_entry(&self, short_url: &str) {
        if let Err(e) = self.cache.invalidate(short_url).await {
            warn!(short_url, error = %e, "Failed to drop stale cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_link(url: &str, short_url: &str) -> Link {
        Link::new(1, url.to_string(), short_url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut links = MockLinkRepository::new();
        let link = create_test_link("https://example.com/a", "http://short.ly/Xy9");

        links
            .expect_find_by_short_url()
            .withf(|short_url| short_url == "http://short.ly/Xy9")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = ResolveService::new(Arc::new(links), Arc::new(NullCache::new()));

        let result = service.resolve("http://short.ly/Xy9").await;
        assert_eq!(result.unwrap(), "https://example.com/a");
    }

    #[tokio::test]
    async fn test_resolve_unknown_is_not_found() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_short_url()
            .times(1)
            .returning(|_| Ok(None));

        let service = ResolveService::new(Arc::new(links), Arc::new(NullCache::new()));

        let result = service.resolve("http://short.ly/zzz").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_is_not_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_short_url().times(1).returning(|_| {
            Err(AppError::store_unavailable("Database error", json!({})))
        });

        let service = ResolveService::new(Arc::new(links), Arc::new(NullCache::new()));

        let result = service.resolve("http://short.ly/abc").await;
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_resolve_cache_hit_skips_store() {
        let mut links = MockLinkRepository::new();
        let mut cache = MockCacheService::new();
        cache.expect_name().return_const("redis");

        cache
            .expect_get_original_url()
            .times(1)
            .returning(|_| Ok(Some("https://cached.example.com".to_string())));
        links.expect_find_by_short_url().times(0);

        let service = ResolveService::new(Arc::new(links), Arc::new(cache));

        let result = service.resolve("http://short.ly/abc").await;
        assert_eq!(result.unwrap(), "https://cached.example.com");
    }

    #[tokio::test]
    async fn test_resolve_cache_miss_populates_cache() {
        let mut links = MockLinkRepository::new();
        let mut cache = MockCacheService::new();
        cache.expect_name().return_const("redis");
        let link = create_test_link("https://example.com/b", "http://short.ly/Bbb");

        cache
            .expect_get_original_url()
            .times(1)
            .returning(|_| Ok(None));
        links
            .expect_find_by_short_url()
            .times(2)
            .returning(move |_| Ok(Some(link.clone())));
        cache
            .expect_set_original_url()
            .withf(|short_url, original_url, ttl| {
                short_url == "http://short.ly/Bbb"
                    && original_url == "https://example.com/b"
                    && ttl.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = ResolveService::new(Arc::new(links), Arc::new(cache));

        let result = service.resolve("http://short.ly/Bbb").await;
        assert_eq!(result.unwrap(), "https://example.com/b");
    }

    #[tokio::test]
    async fn test_resolve_cache_error_falls_back_to_store() {
        let mut links = MockLinkRepository::new();
        let mut cache = MockCacheService::new();
        cache.expect_name().return_const("redis");
        let link = create_test_link("https://example.com/c", "http://short.ly/Ccc");

        cache
            .expect_get_original_url()
            .times(1)
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        links
            .expect_find_by_short_url()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        cache
            .expect_set_original_url()
            .returning(|_, _, _| Err(CacheError::OperationError("down".to_string())));

        let service = ResolveService::new(Arc::new(links), Arc::new(cache));

        let result = service.resolve("http://short.ly/Ccc").await;
        assert_eq!(result.unwrap(), "https://example.com/c");
    }

    #[tokio::test]
    async fn test_resolve_drops_entry_when_link_deleted_during_fill() {
        let mut links = MockLinkRepository::new();
        let mut cache = MockCacheService::new();
        let mut seq = Sequence::new();
        let link = create_test_link("https://example.com/gone", "http://short.ly/Ggg");

        cache.expect_name().return_const("redis");
        cache.expect_get_original_url().returning(|_| Ok(None));
        links
            .expect_find_by_short_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(link.clone())));
        cache
            .expect_set_original_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        links
            .expect_find_by_short_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        cache
            .expect_invalidate()
            .withf(|short_url| short_url == "http://short.ly/Ggg")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = ResolveService::new(Arc::new(links), Arc::new(cache));

        let result = service.resolve("http://short.ly/Ggg").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_without_cache_reads_store_once() {
        let mut links = MockLinkRepository::new();
        let link = create_test_link("https://example.com/d", "http://short.ly/Ddd");

        links
            .expect_find_by_short_url()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = ResolveService::new(Arc::new(links), Arc::new(NullCache::new()));

        assert_eq!(
            service.resolve("http://short.ly/Ddd").await.unwrap(),
            "https://example.com/d"
        );
    }

    #[test]
    fn test_short_url_for() {
        let service = ResolveService::new(
            Arc::new(MockLinkRepository::new()),
            Arc::new(NullCache::new()),
        );

        assert_eq!(
            service.short_url_for("localhost:3000", "abc"),
            "http://localhost:3000/abc"
        );
    }
}
