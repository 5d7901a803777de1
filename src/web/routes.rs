//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{admin_delete_handler, admin_handler, index_handler};
use axum::{
    Router,
    routing::{get, post},
};

/// Public pages.
///
/// # Endpoints
///
/// - `GET /` - Landing page with the shorten form
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}

/// Admin pages, to be wrapped in Basic authentication.
///
/// # Endpoints
///
/// - `GET  /admin`        - Table of all links
/// - `POST /admin/delete` - Delete a link by form `id`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_handler))
        .route("/admin/delete", post(admin_delete_handler))
}
