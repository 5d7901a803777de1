use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
struct NotFoundTemplate {
    header: &'static str,
}

/// HTML page returned for unknown short codes, with status 404.
pub fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            header: "Page cannot be found",
        },
    )
        .into_response()
}

/// Fallback for paths no route matches.
pub async fn not_found_handler() -> Response {
    not_found_page()
}
