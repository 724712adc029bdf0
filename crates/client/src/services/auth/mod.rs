//! Authentication flow.
//!
//! Login and registration hand the issued token to the [`TokenStore`] the
//! service was built with. The transport client reads from the same store,
//! so later requests carry the new token without any further wiring.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use relic_arcade_core::{AccessToken, TokenClaims};
use tracing::{debug, info, instrument};

use crate::client::ApiClient;
use crate::models::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, ResetPasswordRequest,
};
use crate::session::TokenStore;

/// Login, registration and password recovery.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("client", &self.client)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AuthService {
    /// Create the service.
    ///
    /// `store` should be the same store `client` reads credentials from.
    #[must_use]
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self { client, store }
    }

    /// Exchange credentials for an access token and store it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the backend rejects the login and
    /// `AuthError::Store` if the token cannot be persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AccessToken, AuthError> {
        let response: LoginResponse = self.client.post("/auth/login", request).await?;
        let token = AccessToken::new(response.access_token);

        self.store.save(&token)?;
        info!("Logged in");
        Ok(token)
    }

    /// Create an account.
    ///
    /// If the backend logs the new user in directly, the returned token is
    /// stored like a login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the backend rejects the registration and
    /// `AuthError::Store` if a returned token cannot be persisted.
    #[instrument(skip(self, request), fields(email = %request.email, username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, AuthError> {
        let response: RegisterResponse = self.client.post("/auth/register", request).await?;

        if let Some(token) = response.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.store.save(&AccessToken::new(token))?;
            info!("Registered and logged in");
        } else {
            info!("Registered");
        }

        Ok(response)
    }

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the request fails.
    #[instrument(skip(self, request))]
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<MessageResponse, AuthError> {
        Ok(self.client.post("/auth/forgot-password", request).await?)
    }

    /// Set a new password using a reset token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api` if the request fails.
    #[instrument(skip(self, request))]
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<MessageResponse, AuthError> {
        Ok(self.client.post("/auth/reset-password", request).await?)
    }

    /// Forget the stored token. Later requests go out anonymously.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the token cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        debug!("Logged out");
        Ok(())
    }

    /// Claims of the stored token, if there is one and it is a JWT.
    #[must_use]
    pub fn session(&self) -> Option<TokenClaims> {
        self.store.access_token()?.claims()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.access_token().is_some()
    }
}
