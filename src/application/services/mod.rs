//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_admin_service;
pub mod resolve_service;
pub mod shorten_service;

pub use auth_service::AdminAuthService;
pub use link_admin_service::LinkAdminService;
pub use resolve_service::ResolveService;
pub use shorten_service::{DEFAULT_MAX_ATTEMPTS, ShortenService, ShortenSettings};
