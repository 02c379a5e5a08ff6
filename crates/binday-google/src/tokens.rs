//! OAuth token persistence.
//!
//! The access/refresh token pair is cached as a JSON file so subsequent
//! runs skip the interactive consent flow. Writes go through a temp file
//! and rename, and the final file is restricted to the owner on Unix.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GoogleError, GoogleResult};

/// Refresh this long before the recorded expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

/// An access/refresh token pair with its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// The bearer token for API requests.
    pub access_token: String,
    /// The long-lived token used to mint new access tokens.
    pub refresh_token: Option<String>,
    /// When the access token stops working.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Builds a token from an OAuth token-endpoint response.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
    ) -> Self {
        let expires_at =
            expires_in_secs.map(|secs| Utc::now() + Duration::seconds(secs - EXPIRY_SKEW_SECS));
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at,
        }
    }

    /// True when the access token is past (or within the skew of) expiry.
    ///
    /// Tokens without a recorded expiry are assumed valid.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() >= at)
    }
}

/// On-disk token cache at a fixed path.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given path. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached token. `Ok(None)` when no cache exists yet.
    ///
    /// # Errors
    ///
    /// An unreadable or unparsable cache file is an error; the caller
    /// decides whether to fall back to the interactive flow.
    pub fn load(&self) -> GoogleResult<Option<Token>> {
        if !self.path.exists() {
            debug!("no token cache at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let token = serde_json::from_str(&content).map_err(|e| {
            GoogleError::Configuration(format!(
                "unable to parse token cache {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!("loaded token cache from {}", self.path.display());
        Ok(Some(token))
    }

    /// Persists the token, creating parent directories as needed.
    pub fn save(&self, token: &Token) -> GoogleResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(token).map_err(|e| {
            GoogleError::Configuration(format!("unable to serialize token: {}", e))
        })?;

        // Temp file plus rename keeps a crashed run from truncating the cache.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!("saved token cache to {}", self.path.display());
        Ok(())
    }

    /// Removes the cache file if it exists.
    pub fn clear(&self) -> GoogleResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
