//! Handlers for the admin links API.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::links::LinkItem;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every stored link, oldest first.
///
/// # Endpoint
///
/// `GET /api/links` (Basic auth)
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkItem>>, AppError> {
    let links = state.admin_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkItem::from).collect()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}` (Basic auth)
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.admin_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
