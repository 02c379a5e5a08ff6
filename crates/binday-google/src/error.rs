//! Error type for Google Calendar operations.

use thiserror::Error;

/// Errors from credential loading, the OAuth flow, or the Calendar API.
///
/// The variants classify failures for diagnostics only; nothing in this
/// crate retries. The first error aborts the whole run at the top level.
#[derive(Debug, Error)]
pub enum GoogleError {
    /// Missing or malformed local input (secret file, token cache).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The OAuth flow failed or the stored token cannot be used.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The authenticated user may not perform the operation.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Transport-level failure talking to Google.
    #[error("network error: {0}")]
    Network(String),

    /// The API rejected the request for sending too many.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The API answered with an unexpected non-success status.
    #[error("calendar API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx but the payload did not parse.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Local I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Google Calendar operations.
pub type GoogleResult<T> = Result<T, GoogleError>;
