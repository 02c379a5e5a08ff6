//! Authentication command.

use std::path::PathBuf;

use tracing::{info, warn};

use binday_google::{Credentials, listener};

use crate::config::{AppConfig, GoogleSettings};
use crate::defaults;
use crate::error::{ClientError, ClientResult};

/// Runs the OAuth consent flow and caches the resulting token.
pub async fn run(
    client_id: Option<String>,
    client_secret: Option<String>,
    credentials_file: Option<PathBuf>,
    force: bool,
    config: &AppConfig,
) -> ClientResult<()> {
    let credentials =
        resolve_credentials(client_id, client_secret, credentials_file, config.google.as_ref())?;
    credentials.validate()?;

    let store = super::token_store(config);
    if !force
        && let Some(token) = store.load()?
        && (!token.is_expired() || token.refresh_token.is_some())
    {
        println!("Already authenticated; token cached at {}", store.path().display());
        println!("Use --force to re-authenticate.");
        return Ok(());
    }

    // The consent redirect needs somewhere to land.
    if let Err(e) = listener::spawn(defaults::LISTENER_PORT) {
        warn!("authorization code listener unavailable: {}", e);
    }

    let token = super::interactive_authorization(&credentials).await?;
    store.save(&token)?;

    info!("Google authentication successful");
    println!();
    println!("Authentication successful!");
    println!("Token saved to {}", store.path().display());
    Ok(())
}

/// Resolves Google credentials from multiple sources.
///
/// Priority (highest to lowest):
/// 1. explicit `client_id` + `client_secret`
/// 2. a credentials JSON file given on the command line
/// 3. the `[google]` section of `config.toml` (inline values, then the
///    configured `credentials_file`)
pub(crate) fn resolve_credentials(
    cli_client_id: Option<String>,
    cli_client_secret: Option<String>,
    cli_credentials_file: Option<PathBuf>,
    config_google: Option<&GoogleSettings>,
) -> ClientResult<Credentials> {
    if let (Some(id), Some(secret)) = (&cli_client_id, &cli_client_secret) {
        return Ok(Credentials::new(id, secret));
    }

    if let Some(ref path) = cli_credentials_file {
        return Ok(Credentials::from_file(path)?);
    }

    if let Some(google) = config_google {
        if let (Some(id), Some(secret)) = (&google.client_id, &google.client_secret) {
            return Ok(Credentials::new(id, secret));
        }
        if let Some(ref path) = google.credentials_file {
            return Ok(Credentials::from_file(path)?);
        }
    }

    if cli_client_id.is_some() || cli_client_secret.is_some() {
        return Err(ClientError::Config(
            "both --client-id and --client-secret are required when providing credentials directly"
                .to_string(),
        ));
    }

    Err(ClientError::Config(format!(
        "Google credentials are required. Provide via:\n  \
         - client_id + client_secret or credentials_file in {}\n  \
         - --client-id and --client-secret flags\n  \
         - --credentials-file flag (path to Google Cloud Console JSON)\n  \
         - GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET env vars",
        AppConfig::default_path().display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_from_cli_flags() {
        let creds = resolve_credentials(
            Some("cli-id.apps.googleusercontent.com".to_string()),
            Some("cli-secret".to_string()),
            None,
            None,
        )
        .unwrap();
        assert_eq!(creds.client_id, "cli-id.apps.googleusercontent.com");
        assert_eq!(creds.client_secret, "cli-secret");
    }

    #[test]
    fn resolves_from_config() {
        let settings = GoogleSettings {
            client_id: Some("config-id.apps.googleusercontent.com".to_string()),
            client_secret: Some("config-secret".to_string()),
            ..Default::default()
        };
        let creds = resolve_credentials(None, None, None, Some(&settings)).unwrap();
        assert_eq!(creds.client_id, "config-id.apps.googleusercontent.com");
    }

    #[test]
    fn cli_flags_override_config() {
        let settings = GoogleSettings {
            client_id: Some("config-id.apps.googleusercontent.com".to_string()),
            client_secret: Some("config-secret".to_string()),
            ..Default::default()
        };
        let creds = resolve_credentials(
            Some("cli-id.apps.googleusercontent.com".to_string()),
            Some("cli-secret".to_string()),
            None,
            Some(&settings),
        )
        .unwrap();
        assert_eq!(creds.client_id, "cli-id.apps.googleusercontent.com");
    }

    #[test]
    fn resolves_from_cli_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            r#"{"installed": {"client_id": "file-id.apps.googleusercontent.com", "client_secret": "file-secret"}}"#,
        )
        .unwrap();

        let creds = resolve_credentials(None, None, Some(path), None).unwrap();
        assert_eq!(creds.client_id, "file-id.apps.googleusercontent.com");
    }

    #[test]
    fn resolves_from_config_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(
            &path,
            r#"{"web": {"client_id": "web-id.apps.googleusercontent.com", "client_secret": "web-secret"}}"#,
        )
        .unwrap();

        let settings = GoogleSettings {
            credentials_file: Some(path),
            ..Default::default()
        };
        let creds = resolve_credentials(None, None, None, Some(&settings)).unwrap();
        assert_eq!(creds.client_id, "web-id.apps.googleusercontent.com");
    }

    #[test]
    fn partial_cli_flags_fail() {
        assert!(
            resolve_credentials(
                Some("id.apps.googleusercontent.com".to_string()),
                None,
                None,
                None
            )
            .is_err()
        );
        assert!(resolve_credentials(None, Some("secret".to_string()), None, None).is_err());
    }

    #[test]
    fn no_credentials_fails() {
        assert!(resolve_credentials(None, None, None, None).is_err());
    }
}
