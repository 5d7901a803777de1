//! Short code generation.
//!
//! Codes are drawn uniformly from a fixed alphabet using the operating
//! system's CSPRNG. Predictable codes would let anyone enumerate live links,
//! so there is no fallback to a weaker source.

use crate::error::AppError;
use serde_json::json;

/// Upper- and lower-case Latin letters (52 symbols).
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 3;

/// Produces random short codes.
///
/// Implementations are pure generators: they never consult storage, and each
/// call is independent of the previous one. Uniqueness is enforced by the
/// store and the retry loop in
/// [`crate::application::services::ShortenService`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Generates a code of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationFailed`] if the entropy source is unavailable.
    fn generate(&self, length: usize) -> Result<String, AppError>;
}

/// Cryptographically secure generator over a byte alphabet.
#[derive(Debug, Clone)]
pub struct AlphaCodeGenerator {
    alphabet: Vec<u8>,
}

impl AlphaCodeGenerator {
    /// Generator over [`DEFAULT_ALPHABET`].
    pub fn new() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.as_bytes().to_vec(),
        }
    }

    /// Generator over a custom alphabet.
    ///
    /// Symbols must be unique URL-safe ASCII characters (letters, digits, `-`, `_`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the alphabet is empty, contains a
    /// character outside the URL-safe set, or repeats a symbol.
    pub fn with_alphabet(alphabet: &str) -> Result<Self, AppError> {
        let bytes = alphabet.as_bytes();

        if bytes.is_empty() {
            return Err(AppError::bad_request(
                "Alphabet must not be empty",
                json!({}),
            ));
        }

        if !bytes
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        {
            return Err(AppError::bad_request(
                "Alphabet may only contain URL-safe ASCII characters",
                json!({ "alphabet": alphabet }),
            ));
        }

        let mut seen = [false; 128];
        for &b in bytes {
            if seen[b as usize] {
                return Err(AppError::bad_request(
                    "Alphabet symbols must be unique",
                    json!({ "duplicate": (b as char).to_string() }),
                ));
            }
            seen[b as usize] = true;
        }

        Ok(Self {
            alphabet: bytes.to_vec(),
        })
    }

    /// Number of symbols in the alphabet.
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    /// Largest byte value (exclusive) that maps onto the alphabet without bias.
    ///
    /// Bytes at or above this bound are discarded so every symbol is equally likely.
    fn rejection_bound(&self) -> usize {
        let n = self.alphabet.len();
        256 - (256 % n)
    }
}

impl Default for AlphaCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for AlphaCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, AppError> {
        let n = self.alphabet.len();
        let bound = self.rejection_bound();
        let mut code = String::with_capacity(length);
        let mut buffer = vec![0u8; length.max(1) * 2];

        while code.len() < length {
            getrandom::fill(&mut buffer).map_err(|e| {
                tracing::error!(error = %e, "Entropy source unavailable");
                AppError::generation_failed(
                    "Error generating ID",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            for &b in &buffer {
                if code.len() == length {
                    break;
                }
                if (b as usize) < bound {
                    code.push(self.alphabet[b as usize % n] as char);
                }
            }
        }

        Ok(code)
    }
}
