//! Relic Arcade CLI - Command-line access to the storefront API.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the token is stored in RELIC_ARCADE_TOKEN_PATH)
//! ra-cli auth login -e player1@example.com -p 'Hunter2!'
//!
//! # Browse the catalog
//! ra-cli products featured --limit 5
//! ra-cli products filter --platform NES --price-max 50
//!
//! # Manage the cart
//! ra-cli cart add p1 --quantity 2
//! ra-cli cart show
//! ```
//!
//! # Commands
//!
//! - `auth` - Login, registration, password recovery, logout
//! - `products` - Catalog browsing, filtering and image upload
//! - `cart` - Current user's cart
//! - `profile` - Profile, password and avatar
//!
//! Results are printed to stdout as JSON. Logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use relic_arcade_client::{ClientConfig, FileTokenStore, RelicArcade};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "ra-cli")]
#[command(author, version, about = "Relic Arcade storefront CLI")]
struct Cli {
    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<Url>,

    /// Log output format
    #[arg(
        long,
        global = true,
        env = "RELIC_ARCADE_LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value_t = LogFormat::Pretty
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register and recover passwords
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse and manage the catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Manage the signed-in user's profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads RELIC_ARCADE_LOG_FORMAT and the subscriber reads RUST_LOG
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the stderr subscriber in the requested format.
fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "relic_arcade_cli=info,relic_arcade_client=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if format == LogFormat::Json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    let store = Arc::new(FileTokenStore::open(&config.token_path));
    let arcade = RelicArcade::new(&config, store)?;
    tracing::debug!(api_url = %config.api_url, "Client ready");

    match cli.command {
        Commands::Auth { action } => commands::auth::run(&arcade, action).await,
        Commands::Products { action } => commands::products::run(&arcade, action).await,
        Commands::Cart { action } => commands::cart::run(&arcade, action).await,
        Commands::Profile { action } => commands::profile::run(&arcade, action).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::try_parse_from(["ra-cli", "--log-format", "json", "cart", "show"]).unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);

        let args = ["ra-cli", "cart", "show", "--log-format", "PRETTY"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        assert!(Cli::try_parse_from(["ra-cli", "--log-format", "xml", "cart", "show"]).is_err());
    }
}
