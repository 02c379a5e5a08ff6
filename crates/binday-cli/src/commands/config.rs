//! Configuration commands.

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

use super::auth::resolve_credentials;

/// Dump the current configuration to stdout.
pub fn dump(config: &AppConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", AppConfig::default_path().display());
    println!("{}", toml_str);
    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &AppConfig) -> ClientResult<()> {
    if let Some(google) = config.google.as_ref()
        && (google.client_id.is_some()
            || google.client_secret.is_some()
            || google.credentials_file.is_some())
    {
        let credentials = resolve_credentials(None, None, None, config.google.as_ref())?;
        credentials.validate()?;
        println!("Google credentials are valid.");
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    println!("config: {}", AppConfig::default_path().display());
    Ok(())
}
