//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the landing page with the shorten form.
///
/// The form posts to `/shortify`; `js/main.js` shows the returned short URL
/// and a copy button.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    header: &'static str,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {
        header: "Shortify",
    }
}
