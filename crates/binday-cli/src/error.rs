//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the CLI.
///
/// Everything is fatal: errors propagate to `main`, which logs the
/// diagnostic and exits non-zero.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Google OAuth or Calendar API error.
    Google(binday_google::GoogleError),
    /// Schedule computation error.
    Schedule(binday_core::ScheduleError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Google(err) => write!(f, "{}", err),
            Self::Schedule(err) => write!(f, "schedule error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Google(err) => Some(err),
            Self::Schedule(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<binday_google::GoogleError> for ClientError {
    fn from(err: binday_google::GoogleError) -> Self {
        Self::Google(err)
    }
}

impl From<binday_core::ScheduleError> for ClientError {
    fn from(err: binday_core::ScheduleError) -> Self {
        Self::Schedule(err)
    }
}
