//! Host extraction for composing and resolving short URLs.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Returns the host that short URLs are built on for this request.
///
/// A configured host always wins. Otherwise the request's `Host` header is
/// used verbatim, port included, so links minted on `localhost:3000` resolve
/// on `localhost:3000`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no host is configured and the `Host`
/// header is missing, empty, or not valid UTF-8.
pub fn request_host(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(host) = configured {
        return Ok(host.to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Empty Host header", json!({})));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    fn headers_with_host(host: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(host));
        headers
    }

    #[test]
    fn test_configured_host_wins() {
        let headers = headers_with_host("internal:8080");

        let result = request_host(Some("short.ly"), &headers);
        assert_eq!(result.unwrap(), "short.ly");
    }

    #[test]
    fn test_configured_host_without_headers() {
        let result = request_host(Some("short.ly"), &HeaderMap::new());
        assert_eq!(result.unwrap(), "short.ly");
    }

    #[test]
    fn test_header_host_keeps_port() {
        let headers = headers_with_host("localhost:3000");

        let result = request_host(None, &headers);
        assert_eq!(result.unwrap(), "localhost:3000");
    }

    #[test]
    fn test_header_host_plain() {
        let headers = headers_with_host("example.com");

        let result = request_host(None, &headers);
        assert_eq!(result.unwrap(), "example.com");
    }

    #[test]
    fn test_ipv6_host() {
        let headers = headers_with_host("[::1]:8080");

        let result = request_host(None, &headers);
        assert_eq!(result.unwrap(), "[::1]:8080");
    }

    #[test]
    fn test_missing_host_header() {
        let result = request_host(None, &HeaderMap::new());
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_empty_host_header() {
        let headers = headers_with_host("  ");

        let result = request_host(None, &headers);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_utf8_host() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE, 0xFD]) {
            headers.insert(header::HOST, value);

            let result = request_host(None, &headers);
            assert!(result.is_err());
        }
    }
}
