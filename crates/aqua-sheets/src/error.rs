//! Data source error types.

use aqua_core::ReadingError;
use thiserror::Error;

/// Errors that end a refresh cycle.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Service-account key missing or unreadable.
    #[error("invalid service account credentials: {0}")]
    Credentials(String),

    /// Token exchange was refused.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// No spreadsheet with this name is shared with the service account.
    #[error("spreadsheet '{0}' not found or not shared with the service account")]
    SpreadsheetNotFound(String),

    /// Failed to parse a response or a local row.
    #[error("parse error: {0}")]
    Parse(String),

    /// Local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A field of the latest row could not be coerced.
    #[error(transparent)]
    Reading(#[from] ReadingError),
}
