//! Client configuration.
//!
//! All settings live in a single `config.toml` at
//! `~/.config/binday/config.toml` by default. Only credential plumbing is
//! configurable here; the schedule itself is fixed in [`crate::defaults`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the binday CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Google Calendar settings.
    pub google: Option<GoogleSettings>,
}

/// Google credential settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// OAuth client ID.
    pub client_id: Option<String>,

    /// OAuth client secret.
    pub client_secret: Option<String>,

    /// Path to the Google Cloud Console credentials JSON file.
    pub credentials_file: Option<PathBuf>,

    /// Path to the token cache.
    pub token_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read config: {}", e))?;
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("binday")
            .join("config.toml")
    }

    /// Returns the default token cache path.
    pub fn default_token_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("binday")
            .join("token.json")
    }
}
