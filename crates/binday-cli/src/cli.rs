//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// binday - fill a Google calendar with glass-bin collection reminders
#[derive(Debug, Parser)]
#[command(name = "binday")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "BINDAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the OAuth consent flow and cache the token
    Auth {
        /// OAuth client ID (from Google Cloud Console)
        #[arg(long, env = "GOOGLE_CLIENT_ID")]
        client_id: Option<String>,

        /// OAuth client secret (from Google Cloud Console)
        #[arg(long, env = "GOOGLE_CLIENT_SECRET")]
        client_secret: Option<String>,

        /// Path to the Google Cloud Console credentials JSON file
        ///
        /// Alternative to providing client_id and client_secret
        /// separately.
        #[arg(long, env = "GOOGLE_CREDENTIALS_FILE")]
        credentials_file: Option<PathBuf>,

        /// Force re-authentication even if a cached token exists
        #[arg(long, short)]
        force: bool,
    },

    /// Create the calendar and insert every reminder event (the default)
    Provision,

    /// Print the computed reminder dates without touching the network
    Preview,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
