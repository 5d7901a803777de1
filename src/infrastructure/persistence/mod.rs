//! Link store implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::LinkRepository`]
//! using SQLx runtime queries.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL storage
//! - [`SqliteLinkRepository`] - SQLite storage (file or in-memory)
//!
//! [`database`] selects the backend from the connection URL, retries the
//! initial connection and applies migrations.

pub mod database;
pub mod pg_link_repository;
pub mod sqlite_link_repository;

pub use database::{Backend, PoolSettings, RetryPolicy, connect_link_repository};
pub use pg_link_repository::PgLinkRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
