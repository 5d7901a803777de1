//! Application error type shared by the engine and the HTTP layer.
//!
//! Every failure the short-link engine can report maps onto one [`AppError`]
//! variant. Handlers return `Result<_, AppError>` and rely on the
//! [`IntoResponse`] impl to produce a JSON error body:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Short link not found", "details": {} } }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::unique_violation_key;

/// Realm advertised in `WWW-Authenticate` challenges for the admin area.
pub const ADMIN_REALM: &str = "shortify admin";

/// Unique column of the `links` table that rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueKey {
    OriginalUrl,
    ShortUrl,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload, also embedded in batch-style responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client supplied unusable input (empty URL, bad form field).
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Expected miss: unknown short link or admin target.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store rejected an insert on one of its unique constraints.
    #[error("Duplicate value for {key:?}")]
    Duplicate { key: UniqueKey },

    /// The entropy source could not produce a code.
    #[error("{message}")]
    GenerationFailed { message: String, details: Value },

    /// Collision retry budget exceeded for the configured code length.
    #[error("{message}")]
    Exhausted { message: String, details: Value },

    /// Durable storage unreachable or a query failed.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn generation_failed(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationFailed {
            message: message.into(),
            details,
        }
    }

    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::Exhausted {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Duplicate { .. } => StatusCode::CONFLICT,
            Self::GenerationFailed { .. } | Self::Exhausted { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns true for failures that are the server's fault.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::Validation { details, .. } => ("validation_error", details.clone()),
            Self::Unauthorized { details, .. } => ("unauthorized", details.clone()),
            Self::NotFound { details, .. } => ("not_found", details.clone()),
            Self::Duplicate { key } => ("conflict", json!({ "key": key })),
            Self::GenerationFailed { details, .. } => ("generation_failed", details.clone()),
            Self::Exhausted { details, .. } => ("code_space_exhausted", details.clone()),
            Self::StoreUnavailable { details, .. } => ("store_unavailable", details.clone()),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if matches!(self, AppError::Unauthorized { .. }) {
            let challenge = format!(r#"Basic realm="{ADMIN_REALM}""#);
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, value);
            }
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(key) = unique_violation_key(&e) {
            return AppError::Duplicate { key };
        }

        AppError::store_unavailable("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(errors))
    }
}
