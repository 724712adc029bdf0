//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RELIC_ARCADE_API_URL` - Storefront API base URL (default: `http://localhost:3001`)
//! - `RELIC_ARCADE_TOKEN_PATH` - File holding the persisted access token
//!   (default: `.relic-arcade/session.json`)
//! - `RELIC_ARCADE_USER_AGENT` - User agent sent with every request

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Default location of the persisted token file.
pub const DEFAULT_TOKEN_PATH: &str = ".relic-arcade/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_url: Url,
    /// Where the token file store persists the access token
    pub token_path: PathBuf,
    /// User agent sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration pointing at `api_url` with defaults for everything else.
    #[must_use]
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            user_agent: default_user_agent(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("RELIC_ARCADE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let token_path = lookup("RELIC_ARCADE_TOKEN_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH), PathBuf::from);

        let user_agent = lookup("RELIC_ARCADE_USER_AGENT").unwrap_or_else(default_user_agent);

        Ok(Self {
            api_url,
            token_path,
            user_agent,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_user_agent() -> String {
    format!("relic-arcade-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse and validate the API base URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("RELIC_ARCADE_API_URL".to_string(), e.to_string())
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "RELIC_ARCADE_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}
