//! SQLite implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// SQLite repository for single-node deployments and tests.
///
/// `created_at` is bound from the application clock and stored as RFC 3339
/// text.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (original_url, short_url, created_at)
            VALUES (?, ?, ?)
            RETURNING id, original_url, short_url, created_at
            "#,
        )
        .bind(&new_link.original_url)
        .bind(&new_link.short_url)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, original_url, short_url, created_at FROM links WHERE original_url = ?",
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, original_url, short_url, created_at FROM links WHERE short_url = ?",
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            "SELECT id, original_url, short_url, created_at FROM links ORDER BY id ASC",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn delete_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            DELETE FROM links
            WHERE id = ?
            RETURNING id, original_url, short_url, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
