//! Authentication service for the admin area.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Checks HTTP Basic credentials against the configured admin account.
///
/// Credentials are compared as HMAC-SHA256 tags with [`Mac::verify_slice`],
/// which runs in constant time, so response timing does not leak how much of
/// a guess was correct.
pub struct AdminAuthService {
    key: Vec<u8>,
    expected_tag: Vec<u8>,
}

impl AdminAuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `username` - value of `ADMIN_USER`
    /// - `password` - value of `ADMIN_PASS`
    pub fn new(username: &str, password: &str) -> Self {
        let key = Sha256::digest(format!("shortify-admin:{username}").as_bytes()).to_vec();
        let expected_tag = Self::tag(&key, username, password);

        Self { key, expected_tag }
    }

    /// MAC over a length-prefixed `username` followed by `password`.
    ///
    /// The prefix keeps `("ab", "c")` and `("a", "bc")` distinct.
    fn tag(key: &[u8], username: &str, password: &str) -> Vec<u8> {
        Self::mac(key, username, password).finalize().into_bytes().to_vec()
    }

    fn mac(key: &[u8], username: &str, password: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(&(username.len() as u64).to_le_bytes());
        mac.update(username.as_bytes());
        mac.update(password.as_bytes());
        mac
    }

    /// Authenticates a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if either value does not match.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), AppError> {
        Self::mac(&self.key, username, password)
            .verify_slice(&self.expected_tag)
            .map_err(|_| {
                tracing::warn!(username, "Rejected admin credentials");
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid admin credentials" }),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let service = AdminAuthService::new("admin", "s3cret");
        assert!(service.authenticate("admin", "s3cret").is_ok());
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let service = AdminAuthService::new("admin", "s3cret");

        let result = service.authenticate("admin", "guess");
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_authenticate_wrong_username() {
        let service = AdminAuthService::new("admin", "s3cret");
        assert!(service.authenticate("root", "s3cret").is_err());
    }

    #[test]
    fn test_authenticate_shifted_boundary() {
        let service = AdminAuthService::new("ab", "c");
        assert!(service.authenticate("a", "bc").is_err());
        assert!(service.authenticate("ab", "c").is_ok());
    }

    #[test]
    fn test_tag_is_deterministic() {
        let key = b"key";
        assert_eq!(
            AdminAuthService::tag(key, "admin", "pw"),
            AdminAuthService::tag(key, "admin", "pw")
        );
        assert_eq!(AdminAuthService::tag(key, "admin", "pw").len(), 32);
    }
}
