//! Error types for the storefront API client.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when the server fails without saying why.
pub(crate) const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Errors that can occur when calling the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status and an error body.
    ///
    /// Displays as the server's message, verbatim.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message supplied by the server.
        message: String,
    },

    /// The server answered with a non-success status and no usable body.
    #[error("HTTP {status}: {reason}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// A JSON success body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request body or query could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The request path could not be turned into a URL.
    #[error("invalid URL {url}: {source}")]
    Url {
        /// The URL that failed to parse.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An upload file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An upload part could not be built.
    #[error("invalid upload part: {0}")]
    Multipart(String),
}

impl ApiError {
    /// HTTP status for server-reported failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Returns `true` if the requested resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Build the error for a non-success response.
    ///
    /// Uses the `message` field of a JSON object body when present and the
    /// generic message for any other JSON body. Falls back to the status line
    /// when the body is empty, `null`, or not JSON at all.
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Null) | Err(_) => {
                return Self::Http {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                };
            }
            Ok(value @ Value::Object(_)) => serde_json::from_value::<ErrorBody>(value)
                .ok()
                .and_then(|error_body| error_body.message()),
            Ok(_) => None,
        };

        Self::Server {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        }
    }
}

/// Error envelope produced by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// A single message, or a list of validation messages.
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl ErrorBody {
    /// The message as display text, if the body carried a non-empty one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let text = match self.message.as_ref()? {
            Value::String(message) => message.clone(),
            Value::Array(messages) => messages
                .iter()
                .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(", "),
            Value::Null => return None,
            other => other.to_string(),
        };

        (!text.is_empty()).then_some(text)
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
