//! Utility functions for code generation, storage error handling, and request handling.
//!
//! - [`code_generator`] - Short code generation
//! - [`db_error`] - Unique-violation classification for the link store
//! - [`extract_host`] - Host extraction from HTTP headers
//! - [`location`] - `Location` header values for stored URLs

pub mod code_generator;
pub mod db_error;
pub mod extract_host;
pub mod location;
