//! Service set shared by one application.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::services::{AuthService, CartService, ProductService, UserService};
use crate::session::TokenStore;

/// One instance of every service, all sharing a single transport client.
///
/// Build it once at startup and pass it (or clones of it) wherever API
/// access is needed. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct RelicArcade {
    client: ApiClient,
    auth: AuthService,
    users: UserService,
    products: ProductService,
    cart: CartService,
}

impl RelicArcade {
    /// Build the services over `store`.
    ///
    /// The store both supplies the bearer token for every request and
    /// receives the token issued by login or registration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new<S>(config: &ClientConfig, store: Arc<S>) -> Result<Self, ApiError>
    where
        S: TokenStore + 'static,
    {
        let client = ApiClient::new(config, store.clone())?;
        Ok(Self::from_client(client, store))
    }

    /// Build the services around an existing transport client.
    ///
    /// `store` should be the credential provider `client` was built with.
    #[must_use]
    pub fn from_client(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            auth: AuthService::new(client.clone(), store),
            users: UserService::new(client.clone()),
            products: ProductService::new(client.clone()),
            cart: CartService::new(client.clone()),
            client,
        }
    }

    /// Get a reference to the transport client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub const fn users(&self) -> &UserService {
        &self.users
    }

    #[must_use]
    pub const fn products(&self) -> &ProductService {
        &self.products
    }

    #[must_use]
    pub const fn cart(&self) -> &CartService {
        &self.cart
    }
}
