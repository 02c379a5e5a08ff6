//! OAuth 2.0 authorization-code flow with PKCE.
//!
//! The redirect target is the local echo listener, and the user relays the
//! authorization code by hand: the listener prints it, the CLI reads it
//! back from standard input. Because the code travels through the user
//! rather than an in-process callback, the exchange is protected by the
//! PKCE verifier (RFC 7636) instead of a state check.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng as _;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::credentials::Credentials;
use crate::error::{GoogleError, GoogleResult};
use crate::tokens::Token;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Full read/write access to the user's calendars. Calendar creation needs
/// the full scope, not the readonly one.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// PKCE code verifier length in bytes, before base64 encoding.
const VERIFIER_BYTES: usize = 32;

/// A single authorization attempt.
///
/// Holds the PKCE verifier for its lifetime, so the same flow value must be
/// used to build the URL and to exchange the resulting code.
#[derive(Debug)]
pub struct OAuthFlow {
    credentials: Credentials,
    redirect_uri: String,
    verifier: String,
    http: reqwest::Client,
}

impl OAuthFlow {
    /// Creates a new flow with a fresh random verifier.
    pub fn new(
        credentials: Credentials,
        redirect_uri: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            credentials,
            redirect_uri: redirect_uri.into(),
            verifier: generate_verifier(),
            http,
        }
    }

    /// The URL the user must open in a browser to grant access.
    ///
    /// Requests offline access with a forced consent prompt so Google
    /// returns a refresh token.
    pub fn auth_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&\
             code_challenge={}&code_challenge_method=S256&\
             access_type=offline&prompt=consent",
            AUTH_ENDPOINT,
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(CALENDAR_SCOPE),
            urlencoding::encode(&compute_challenge(&self.verifier)),
        )
    }

    /// Exchanges a pasted authorization code for a token pair.
    ///
    /// # Errors
    ///
    /// A rejected code (mistyped, expired, already used) comes back as an
    /// authentication error carrying Google's response body.
    pub async fn exchange_code(&self, code: &str) -> GoogleResult<Token> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("code_verifier", self.verifier.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let parsed = self.token_request(&params, "token exchange").await?;

        info!("authorization code exchanged for tokens");
        Ok(Token::new(
            parsed.access_token,
            parsed.refresh_token,
            parsed.expires_in,
        ))
    }

    /// Obtains a fresh access token from a refresh token.
    ///
    /// The refresh token itself is carried over into the returned token,
    /// since Google usually omits it from refresh responses.
    pub async fn refresh(&self, refresh_token: &str) -> GoogleResult<Token> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let parsed = self.token_request(&params, "token refresh").await?;

        info!("access token refreshed");
        Ok(Token::new(
            parsed.access_token,
            parsed
                .refresh_token
                .or_else(|| Some(refresh_token.to_string())),
            parsed.expires_in,
        ))
    }

    /// POSTs a form to the token endpoint and parses the response.
    async fn token_request(
        &self,
        params: &[(&str, &str)],
        what: &str,
    ) -> GoogleResult<TokenResponse> {
        let response = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(params)
            .send()
            .await
            .map_err(|e| GoogleError::Network(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GoogleError::Network(format!("failed to read {} response: {}", what, e)))?;

        if !status.is_success() {
            return Err(GoogleError::Authentication(format!(
                "{} failed ({}): {}",
                what, status, body
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| GoogleError::InvalidResponse(format!("invalid {} response: {}", what, e)))
    }
}

/// Generates a cryptographically random code verifier.
fn generate_verifier() -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..VERIFIER_BYTES).map(|_| rng.random()).collect();
    URL_SAFE_NO_PAD.encode(&bytes)
}

/// Computes the SHA-256 challenge for a code verifier.
fn compute_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Response from Google's token endpoint.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_flow() -> OAuthFlow {
        OAuthFlow::new(
            Credentials::new("test-client.apps.googleusercontent.com", "test-secret"),
            "http://localhost:3000",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn verifier_is_43_chars() {
        // Base64url of 32 bytes, no padding.
        assert_eq!(generate_verifier().len(), 43);
    }

    #[test]
    fn verifiers_differ_between_flows() {
        assert_ne!(test_flow().verifier, test_flow().verifier);
    }

    #[test]
    fn challenge_is_deterministic() {
        let verifier = "test-verifier-string";
        assert_eq!(compute_challenge(verifier), compute_challenge(verifier));
    }

    #[test]
    fn auth_url_carries_the_flow_parameters() {
        let url = test_flow().auth_url();
        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_id=test-client.apps.googleusercontent.com"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("code_challenge="));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains(&urlencoding::encode(CALENDAR_SCOPE).into_owned()));
    }

    #[test]
    fn token_response_parses_without_optional_fields() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert!(parsed.refresh_token.is_none());
        assert!(parsed.expires_in.is_none());
    }
}
