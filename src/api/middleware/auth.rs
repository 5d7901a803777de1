//! HTTP Basic authentication middleware for the admin area.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using HTTP Basic credentials.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(<user>:<password>)
/// ```
///
/// Credentials are checked against `ADMIN_USER` / `ADMIN_PASS` by
/// [`crate::application::services::AdminAuthService`].
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if
/// the header is missing, malformed or carries the wrong credentials, so
/// browsers show their login prompt.
///
/// # Example
///
/// ```rust,ignore
/// let admin = Router::new()
///     .route("/admin", get(admin_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((username, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    st.auth_service
        .authenticate(&username, password.as_deref().unwrap_or_default())?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
