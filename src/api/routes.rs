//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, health_handler, list_links_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Routes open to everyone.
///
/// # Endpoints
///
/// - `POST /shortify` - Get or create the short URL for a form-submitted URL
/// - `GET  /health`   - Database and cache checks
/// - `GET  /{code}`   - Redirect to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shortify", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}

/// Admin JSON routes, to be wrapped in Basic authentication.
///
/// # Endpoints
///
/// - `GET    /links`      - List all links
/// - `DELETE /links/{id}` - Permanently delete a link
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler))
        .route("/links/{id}", delete(delete_link_handler))
}
