//! Command implementations and the helpers they share.

pub mod auth;
pub mod config;
pub mod preview;
pub mod provision;

use std::io::Write;
use std::time::Duration;

use binday_core::Schedule;
use binday_google::{Credentials, OAuthFlow, Token, TokenStore};
use chrono_tz::Tz;

use crate::config::AppConfig;
use crate::defaults;
use crate::error::{ClientError, ClientResult};

/// Timeout applied to every outbound HTTP request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the fixed collection schedule from [`crate::defaults`].
pub(crate) fn build_schedule() -> ClientResult<Schedule> {
    let tz: Tz = defaults::TIME_ZONE.parse().map_err(|e| {
        ClientError::Config(format!("invalid time zone {}: {}", defaults::TIME_ZONE, e))
    })?;

    Ok(Schedule {
        start_year: defaults::START_YEAR,
        years: defaults::NB_OF_YEARS,
        weekday: defaults::WEEKDAY,
        occurrence: defaults::OCCURRENCE,
        day_offset: defaults::DAY_OFFSET,
        hour: defaults::EVENT_HOUR,
        tz,
    })
}

/// Returns the token store at the configured (or default) cache path.
pub(crate) fn token_store(config: &AppConfig) -> TokenStore {
    let path = config
        .google
        .as_ref()
        .and_then(|g| g.token_path.clone())
        .unwrap_or_else(AppConfig::default_token_path);
    TokenStore::new(path)
}

/// The redirect URI matching the echo listener.
pub(crate) fn redirect_uri() -> String {
    format!("http://localhost:{}", defaults::LISTENER_PORT)
}

/// Runs the interactive consent flow: print the authorization URL, block
/// on the pasted code, exchange it for tokens.
pub(crate) async fn interactive_authorization(credentials: &Credentials) -> ClientResult<Token> {
    let flow = OAuthFlow::new(credentials.clone(), redirect_uri(), REQUEST_TIMEOUT);

    println!("Go to the following link in your browser, then paste the");
    println!("authorization code printed below:");
    println!();
    println!("{}", flow.auth_url());
    println!();
    print!("Authorization code: ");
    std::io::stdout().flush()?;

    let code = read_code()?;
    let token = flow.exchange_code(&code).await?;
    Ok(token)
}

/// Reads the authorization code from standard input.
fn read_code() -> ClientResult<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let code = line.trim();
    if code.is_empty() {
        return Err(ClientError::Config(
            "no authorization code entered".to_string(),
        ));
    }
    Ok(code.to_string())
}

/// Returns a usable token: cached, refreshed, or interactively obtained.
///
/// Every path that mints a new token persists it before returning.
pub(crate) async fn obtain_token(
    credentials: &Credentials,
    config: &AppConfig,
) -> ClientResult<Token> {
    let store = token_store(config);

    match store.load()? {
        Some(token) if !token.is_expired() => Ok(token),
        Some(Token {
            refresh_token: Some(refresh),
            ..
        }) => {
            let flow = OAuthFlow::new(credentials.clone(), redirect_uri(), REQUEST_TIMEOUT);
            let token = flow.refresh(&refresh).await?;
            store.save(&token)?;
            Ok(token)
        }
        _ => {
            let token = interactive_authorization(credentials).await?;
            store.save(&token)?;
            Ok(token)
        }
    }
}
