//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL and SQLite link stores

pub mod cache;
pub mod persistence;
