//! Classification of unique-constraint violations raised by the link store.

use crate::error::UniqueKey;

/// Constraint and index names created by the Postgres migrations.
const ORIGINAL_URL_CONSTRAINT: &str = "links_original_url_key";
const SHORT_URL_CONSTRAINT: &str = "links_short_url_key";

/// Returns which `links` column rejected the statement, if the error is a
/// unique violation on one of them.
///
/// Postgres reports the constraint name. SQLite does not, so its message
/// (`UNIQUE constraint failed: links.short_url`) is inspected instead.
pub fn unique_violation_key(e: &sqlx::Error) -> Option<UniqueKey> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(ORIGINAL_URL_CONSTRAINT) => return Some(UniqueKey::OriginalUrl),
        Some(SHORT_URL_CONSTRAINT) => return Some(UniqueKey::ShortUrl),
        _ => {}
    }

    classify_message(db_err.message())
}

fn classify_message(message: &str) -> Option<UniqueKey> {
    if message.contains("original_url") {
        Some(UniqueKey::OriginalUrl)
    } else if message.contains("short_url") {
        Some(UniqueKey::ShortUrl)
    } else {
        None
    }
}
