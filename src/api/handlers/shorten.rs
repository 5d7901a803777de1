//! Handler for link shortening endpoint.

use axum::{Form, Json, extract::State, http::HeaderMap};
use validator::Validate;

use crate::api::dto::shorten::{ShortenForm, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::request_host;

/// Returns the short URL for a submitted original URL.
///
/// # Endpoint
///
/// `POST /shortify` with an `application/x-www-form-urlencoded` body:
///
/// ```text
/// url=https://example.com/some/long/path
/// ```
///
/// # Response
///
/// ```json
/// { "shortURL": "http://short.ly/Xy9" }
/// ```
///
/// Submitting the same URL again returns the same short URL.
///
/// # Errors
///
/// - 400 if `url` is empty or the host cannot be determined
/// - 500 if no free code was found or the entropy source failed
/// - 503 if the database is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<Json<ShortenResponse>, AppError> {
    form.validate()?;

    let host = request_host(state.host_uri.as_deref(), &headers)?;
    let short_url = state.shorten_service.shorten(&form.url, &host).await?;

    Ok(Json(ShortenResponse { short_url }))
}
