//! OAuth client-secret file handling.
//!
//! Google requires registered applications for Calendar API access, so the
//! user supplies their own client ID and secret, usually as the JSON file
//! downloaded from the Google Cloud Console credentials page.

use std::path::Path;

use serde::Deserialize;

use crate::error::{GoogleError, GoogleResult};

/// OAuth 2.0 client credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The OAuth 2.0 client ID.
    pub client_id: String,
    /// The OAuth 2.0 client secret.
    pub client_secret: String,
}

/// Shape of the Google Cloud Console client-secret JSON.
///
/// Desktop applications carry an `installed` section, web applications a
/// `web` section; both hold the same fields.
#[derive(Debug, Deserialize)]
struct SecretFile {
    installed: Option<SecretSection>,
    web: Option<SecretSection>,
}

#[derive(Debug, Deserialize)]
struct SecretSection {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    /// Creates credentials from raw values.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads and parses a client-secret JSON file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the file cannot be read or does
    /// not hold an `installed` or `web` section.
    pub fn from_file(path: impl AsRef<Path>) -> GoogleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GoogleError::Configuration(format!(
                "unable to read client secret file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parses client-secret JSON.
    pub fn from_json(json: &str) -> GoogleResult<Self> {
        let file: SecretFile = serde_json::from_str(json).map_err(|e| {
            GoogleError::Configuration(format!("unable to parse client secret file: {}", e))
        })?;

        let section = file.installed.or(file.web).ok_or_else(|| {
            GoogleError::Configuration(
                "client secret file has no 'installed' or 'web' section".to_string(),
            )
        })?;

        Ok(Self::new(section.client_id, section.client_secret))
    }

    /// Cheap sanity check before starting a flow.
    pub fn validate(&self) -> GoogleResult<()> {
        if self.client_id.is_empty() {
            return Err(GoogleError::Configuration("client_id is empty".to_string()));
        }
        if !self.client_id.ends_with(".apps.googleusercontent.com") {
            return Err(GoogleError::Configuration(
                "client_id should end with .apps.googleusercontent.com".to_string(),
            ));
        }
        if self.client_secret.is_empty() {
            return Err(GoogleError::Configuration(
                "client_secret is empty".to_string(),
            ));
        }
        Ok(())
    }
}
