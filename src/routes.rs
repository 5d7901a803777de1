//! Top-level router combining API, page and static routes.
//!
//! # Route Structure
//!
//! - `GET  /`                   - Landing page (public)
//! - `POST /shortify`           - Shorten a URL (public)
//! - `GET  /health`             - Database and cache checks (public)
//! - `GET  /{code}`             - Short link redirect (public)
//! - `GET  /admin`, `POST /admin/delete` - Admin pages (Basic auth)
//! - `/api/links*`              - Admin JSON API (Basic auth)
//! - `/css/*`, `/js/*`, `/imgs/*` - Static assets from `assets/`
//! - anything else               - HTML not-found page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - HTTP Basic on admin routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use axum::{Router, middleware};
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Directory holding the `css`, `js` and `imgs` asset folders.
pub const ASSETS_DIR: &str = "assets";

/// Constructs the application router with all routes and middleware.
///
/// Literal paths such as `/admin` and `/css` win over the `/{code}` capture.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes with state applied, without path normalization.
pub fn router(state: AppState) -> Router {
    let admin_router = Router::new()
        .merge(web::routes::admin_routes())
        .nest("/api", api::routes::admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let assets = Path::new(ASSETS_DIR);

    Router::new()
        .merge(web::routes::public_routes())
        .merge(api::routes::public_routes())
        .merge(admin_router)
        .nest_service("/css", ServeDir::new(assets.join("css")))
        .nest_service("/js", ServeDir::new(assets.join("js")))
        .nest_service("/imgs", ServeDir::new(assets.join("imgs")))
        .fallback(web::handlers::not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}
