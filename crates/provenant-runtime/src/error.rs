//! Error types for fetching and checking.

use provenant_audit::AuditError;
use thiserror::Error;

/// Why a directive document could not be retrieved.
///
/// The checker never fails because of these; an unavailable document is
/// treated exactly like an empty one.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with something other than 200 OK.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The document body exceeded the configured size limit.
    #[error("document larger than {limit} bytes")]
    TooLarge { limit: u64 },
}

/// Errors returned by [`PermissionChecker::check`](crate::PermissionChecker::check).
#[derive(Debug, Error)]
pub enum CheckError {
    /// The target URL could not be parsed. Raised before any fetch.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The target URL parsed but cannot address a site's directive document.
    #[error("unsupported URL '{url}': {reason}")]
    UnsupportedUrl { url: String, reason: &'static str },

    /// The decision was made but could not be written to the provenance log.
    #[error("provenance log unavailable: {0}")]
    Persistence(#[from] AuditError),

    /// The fetcher could not be set up.
    #[error(transparent)]
    Fetcher(#[from] FetchError),
}
