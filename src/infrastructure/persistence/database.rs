//! Database connection bootstrap.
//!
//! Picks the backend from the URL scheme, waits for the server with a fixed
//! retry interval, applies the embedded migrations and hands back a
//! [`LinkRepository`] trait object for injection into the services.

use anyhow::{Context, Result, bail};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use super::{PgLinkRepository, SqliteLinkRepository};
use crate::domain::repositories::LinkRepository;

/// Storage backend selected by the `DATABASE_URL` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Detects the backend from a connection URL.
    ///
    /// # Errors
    ///
    /// Returns an error for any scheme other than `postgres://`,
    /// `postgresql://` or `sqlite:`.
    pub fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            bail!("Unsupported database URL scheme in '{}'", url)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::Sqlite => "SQLite",
        }
    }
}

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// How long to wait for the database to come up at process start.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total connection attempts, including the first one.
    pub attempts: usize,
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            interval: Duration::from_secs(2),
        }
    }
}

/// Connects to the configured backend, runs migrations and returns the link store.
///
/// # Errors
///
/// Returns an error if the URL scheme is unsupported, the database stays
/// unreachable for every retry attempt, or migrations fail.
pub async fn connect_link_repository(
    database_url: &str,
    settings: &PoolSettings,
    retry: RetryPolicy,
) -> Result<Arc<dyn LinkRepository>> {
    let backend = Backend::from_url(database_url)?;

    let repository: Arc<dyn LinkRepository> = match backend {
        Backend::Postgres => {
            let pool = with_retry(retry, || connect_postgres(database_url, settings)).await?;
            migrate_postgres(&pool).await?;
            Arc::new(PgLinkRepository::new(Arc::new(pool)))
        }
        Backend::Sqlite => {
            let pool = with_retry(retry, || connect_sqlite(database_url, settings)).await?;
            migrate_sqlite(&pool).await?;
            Arc::new(SqliteLinkRepository::new(Arc::new(pool)))
        }
    };

    tracing::info!(backend = backend.name(), "Connected to database");

    Ok(repository)
}

/// Opens a PostgreSQL pool.
pub async fn connect_postgres(url: &str, settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .connect(url)
        .await
}

/// Opens a SQLite pool, creating the database file if needed.
///
/// An in-memory database lives only as long as its connection, so
/// `sqlite::memory:` is pinned to a single connection that is never recycled.
pub async fn connect_sqlite(url: &str, settings: &PoolSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
    };

    pool_options
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await
}

/// Applies the PostgreSQL schema.
pub async fn migrate_postgres(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .context("Failed to migrate PostgreSQL database")
}

/// Applies the SQLite schema.
pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .context("Failed to migrate SQLite database")
}

/// Retries `connect` at a fixed interval until it succeeds or attempts run out.
async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut connect: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    let attempts = policy.attempts.max(1);
    let strategy = FixedInterval::new(policy.interval).take(attempts - 1);
    let mut attempt = 0usize;

    Retry::start(strategy, || {
        attempt += 1;
        let current = attempt;
        let fut = connect();
        async move {
            fut.await.inspect_err(|e| {
                tracing::warn!(
                    attempt = current,
                    max_attempts = attempts,
                    error = %e,
                    "Waiting for database..."
                );
            })
        }
    })
    .await
    .with_context(|| format!("Could not connect to database after {attempts} attempts"))
}
