//! Get-or-create service for short links.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{NewLink, compose_short_url};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, UniqueKey};
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

/// Default number of insert attempts before giving up on a free code.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Tuning for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortenSettings {
    /// Characters per generated code.
    pub code_length: usize,
    /// Insert attempts per request; each collision consumes one.
    pub max_attempts: usize,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service that maps an original URL to its one and only short URL.
///
/// # Idempotence
///
/// A URL that already has a link gets the existing short URL back. Under
/// concurrent creation the store's unique constraint on `original_url`
/// rejects every insert but one; losers re-read the winning record instead
/// of failing.
///
/// # Collisions
///
/// The default 3-letter code space holds 140,608 codes, so collisions are
/// expected after a few hundred links. A rejected `short_url` triggers a fresh
/// code, bounded by [`ShortenSettings::max_attempts`].
pub struct ShortenService<L: LinkRepository + ?Sized, G: CodeGenerator + ?Sized> {
    link_repository: Arc<L>,
    generator: Arc<G>,
    settings: ShortenSettings,
}

impl<L: LinkRepository + ?Sized, G: CodeGenerator + ?Sized> ShortenService<L, G> {
    /// Creates a new shorten service.
    pub fn new(link_repository: Arc<L>, generator: Arc<G>, settings: ShortenSettings) -> Self {
        Self {
            link_repository,
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> ShortenSettings {
        self.settings
    }

    /// Returns the short URL for `original_url`, creating it on first use.
    ///
    /// New links are composed as `http://{host}/{code}`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `original_url` is empty
    /// - [`AppError::GenerationFailed`] if the entropy source fails
    /// - [`AppError::Exhausted`] if every attempt collided with an existing code
    /// - [`AppError::StoreUnavailable`] on database errors
    pub async fn shorten(&self, original_url: &str, host: &str) -> Result<String, AppError> {
        if original_url.trim().is_empty() {
            return Err(AppError::bad_request("URL is required", json!({})));
        }

        if let Some(existing) = self
            .link_repository
            .find_by_original_url(original_url)
            .await?
        {
            debug!(id = existing.id, short_url = %existing.short_url, "Reusing existing link");
            return Ok(existing.short_url);
        }

        let max_attempts = self.settings.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let code = self.generator.generate(self.settings.code_length)?;
            let new_link = NewLink {
                original_url: original_url.to_string(),
                short_url: compose_short_url(host, &code),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(id = link.id, short_url = %link.short_url, attempt, "Created short link");
                    return Ok(link.short_url);
                }
                Err(AppError::Duplicate {
                    key: UniqueKey::ShortUrl,
                }) => {
                    warn!(attempt, max_attempts, code = %code, "Short code collision, retrying");
                }
                Err(AppError::Duplicate {
                    key: UniqueKey::OriginalUrl,
                }) => {
                    if let Some(winner) = self
                        .link_repository
                        .find_by_original_url(original_url)
                        .await?
                    {
                        debug!(id = winner.id, "Concurrent creator won, returning its link");
                        return Ok(winner.short_url);
                    }
                    warn!(attempt, "Conflicting link disappeared before re-read, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            max_attempts,
            code_length = self.settings.code_length,
            "Short code space exhausted; increase CODE_LENGTH"
        );

        Err(AppError::exhausted(
            "Failed to generate unique code",
            json!({
                "reason": "Too many collisions",
                "attempts": max_attempts,
                "code_length": self.settings.code_length,
            }),
        ))
    }
}
