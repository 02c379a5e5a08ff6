//! binday CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use binday_cli::cli::{Cli, Command, ConfigAction};
use binday_cli::config::AppConfig;
use binday_cli::error::ClientResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path).map_err(binday_cli::error::ClientError::Config)?
    } else {
        AppConfig::load().unwrap_or_default()
    };

    match cli.command {
        Some(Command::Auth {
            client_id,
            client_secret,
            credentials_file,
            force,
        }) => {
            binday_cli::commands::auth::run(client_id, client_secret, credentials_file, force, &config)
                .await
        }
        Some(Command::Preview) => binday_cli::commands::preview::run(),
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => binday_cli::commands::config::dump(&config),
            ConfigAction::Validate => binday_cli::commands::config::validate(&config),
            ConfigAction::Path => binday_cli::commands::config::path(),
        },
        Some(Command::Provision) | None => binday_cli::commands::provision::run(&config).await,
    }
}
