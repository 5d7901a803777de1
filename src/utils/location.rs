//! Turns stored original URLs into `Location` header values.

use axum::http::HeaderValue;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::json;

use crate::error::AppError;

/// Bytes a header value cannot carry. Non-ASCII is always encoded.
///
/// `%` is left alone so escapes already present in the URL survive.
const HEADER_UNSAFE: &AsciiSet = &CONTROLS.add(b' ');

/// Percent-encodes the bytes of `url` that are not visible ASCII.
///
/// Original URLs are stored verbatim, so a link can hold a newline or
/// non-ASCII text that `HeaderValue` rejects. Everything else passes through
/// unchanged.
pub fn location_value(url: &str) -> Result<HeaderValue, AppError> {
    let encoded = utf8_percent_encode(url, HEADER_UNSAFE).to_string();

    HeaderValue::try_from(encoded).map_err(|_| {
        AppError::bad_request(
            "URL cannot be used as a redirect target",
            json!({ "url": url }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(url: &str) -> String {
        location_value(url).unwrap().to_str().unwrap().to_string()
    }

    #[test]
    fn test_plain_url_is_unchanged() {
        assert_eq!(
            location("https://example.com/a?b=c&d=%20#frag"),
            "https://example.com/a?b=c&d=%20#frag"
        );
    }

    #[test]
    fn test_control_characters_are_encoded() {
        assert_eq!(location("https://example.com/a\nb"), "https://example.com/a%0Ab");
        assert_eq!(location("https://example.com/a\r\nb"), "https://example.com/a%0D%0Ab");
        assert_eq!(location("https://example.com/\x7f"), "https://example.com/%7F");
    }

    #[test]
    fn test_space_and_non_ascii_are_encoded() {
        assert_eq!(location("https://example.com/a b"), "https://example.com/a%20b");
        assert_eq!(location("https://example.com/café"), "https://example.com/caf%C3%A9");
    }
}
