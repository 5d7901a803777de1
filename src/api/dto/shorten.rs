//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Form body of `POST /shortify`.
///
/// A missing `url` field deserializes to an empty string so that it is
/// reported as a validation error rather than a form rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

/// Response of `POST /shortify`. Field name is fixed by the front-end script.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortURL")]
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_name() {
        let body = serde_json::to_value(ShortenResponse {
            short_url: "http://short.ly/abc".to_string(),
        })
        .unwrap();

        assert_eq!(body["shortURL"], "http://short.ly/abc");
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let form = ShortenForm { url: String::new() };
        assert!(form.validate().is_err());

        let form = ShortenForm {
            url: "https://example.com".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
