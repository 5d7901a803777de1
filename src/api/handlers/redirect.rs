//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::request_host;
use crate::utils::location::location_value;
use crate::web::handlers::not_found_page;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The lookup key is the full short URL `http://{host}/{code}`, where host is
/// `HOST_URI` or the request `Host` header, matching how links are created.
///
/// # Responses
///
/// - 302 Found with `Location` set to the original URL
/// - 404 with the HTML not-found page for unknown codes
///
/// # Errors
///
/// Returns 400 if the host cannot be determined and 503 if the database is unavailable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let host = request_host(state.host_uri.as_deref(), &headers)?;
    let short_url = state.resolve_service.short_url_for(&host, &code);

    match state.resolve_service.resolve(&short_url).await {
        Ok(original_url) => found(&original_url),
        Err(AppError::NotFound { .. }) => Ok(not_found_page()),
        Err(e) => Err(e),
    }
}

/// Builds a `302 Found` response.
///
/// `axum::response::Redirect` only offers 303, 307 and 308.
fn found(location: &str) -> Result<Response, AppError> {
    let location = location_value(location)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
