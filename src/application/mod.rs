//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and expose a small API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Get-or-create of short links
//! - [`services::resolve_service::ResolveService`] - Short URL lookup for redirects
//! - [`services::link_admin_service::LinkAdminService`] - Listing and deletion
//! - [`services::auth_service::AdminAuthService`] - Admin credential checks

pub mod services;
