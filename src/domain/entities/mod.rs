//! Core domain entities.
//!
//! - [`Link`] - A persisted mapping between an original URL and its short URL
//! - [`NewLink`] - Insert input; `id` and `created_at` are assigned by the store

pub mod link;

pub use link::{Link, NewLink, compose_short_url};
