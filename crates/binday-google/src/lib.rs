//! Google Calendar access for binday.
//!
//! # Authentication Flow
//!
//! 1. The client-secret JSON from the Google Cloud Console is parsed into
//!    [`Credentials`]
//! 2. The local echo [`listener`] is started on its fixed port
//! 3. An [`OAuthFlow`] builds the authorization URL, which is printed for
//!    the user to open
//! 4. After consent, Google redirects the browser to the listener, which
//!    prints the authorization code
//! 5. The user pastes the code at the terminal prompt; the flow exchanges
//!    it (with the PKCE verifier) for access and refresh tokens
//! 6. The tokens are persisted through [`TokenStore`] for future runs
//!
//! With a valid token in hand, [`CalendarClient`] performs the two write
//! operations the tool needs: calendar insert and event insert.

pub mod client;
pub mod credentials;
pub mod error;
pub mod listener;
pub mod oauth;
pub mod tokens;

pub use client::{CalendarClient, EventRequest};
pub use credentials::Credentials;
pub use error::{GoogleError, GoogleResult};
pub use oauth::{CALENDAR_SCOPE, OAuthFlow};
pub use tokens::{Token, TokenStore};
