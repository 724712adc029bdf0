//! Authentication error types.

use thiserror::Error;

use crate::error::ApiError;
use crate::session::TokenError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The issued token could not be persisted or removed.
    #[error("token store error: {0}")]
    Store(#[from] TokenError),
}

impl AuthError {
    /// Whether the backend rejected the credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        match self {
            Self::Api(err) => err.is_unauthorized(),
            Self::Store(_) => false,
        }
    }
}
