//! Subcommand implementations.

use std::path::{Path, PathBuf};

use relic_arcade_client::{ApiError, AuthError, ConfigError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod auth;
pub mod cart;
pub mod products;
pub mod profile;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("could not render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Print a command result to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read a JSON request body from a file.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_passes_through() {
        let err = CliError::from(ApiError::Server {
            status: 400,
            message: "Invalid quantity".to_string(),
        });
        assert_eq!(err.to_string(), "Invalid quantity");
    }

    #[tokio::test]
    async fn test_read_json_missing_file() {
        let result = read_json::<serde_json::Value>(Path::new("/no/such/body.json")).await;
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}
