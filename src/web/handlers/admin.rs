//! Admin page: link table and delete action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// One table row on the admin page.
struct AdminRow {
    id: i64,
    url: String,
    /// Only http(s) URLs are rendered as links; anything else is plain text.
    linkable: bool,
    short: String,
    date: String,
}

impl From<Link> for AdminRow {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            date: link.created_at_display(),
            linkable: is_http_url(&link.original_url),
            url: link.original_url,
            short: link.short_url,
        }
    }
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
struct AdminTemplate {
    links: Vec<AdminRow>,
}

/// Form body of `POST /admin/delete`.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: Option<String>,
}

/// Renders every stored link with a delete button per row.
///
/// # Endpoint
///
/// `GET /admin` (Basic auth)
pub async fn admin_handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let links = state.admin_service.list_links().await?;

    Ok(AdminTemplate {
        links: links.into_iter().map(AdminRow::from).collect(),
    })
}

/// Deletes the link named by the form's `id` and returns to the admin page.
///
/// # Endpoint
///
/// `POST /admin/delete` (Basic auth)
///
/// # Errors
///
/// - 400 "Missing id" / "Invalid id" for an absent or non-numeric id
/// - 404 if no link has this id
pub async fn admin_delete_handler(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let id = parse_id(form.id.as_deref())?;

    state.admin_service.delete_link(id).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, "/admin")]).into_response())
}

fn parse_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();

    if raw.is_empty() {
        return Err(AppError::bad_request("Missing id", json!({})));
    }

    raw.parse()
        .map_err(|_| AppError::bad_request("Invalid id", json!({ "id": raw })))
}
