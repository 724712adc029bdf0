//! Relic Arcade Client - Typed access layer over the storefront REST API.
//!
//! # Architecture
//!
//! - [`ApiClient`] is the only component that performs HTTP. It appends the
//!   bearer token from an injected [`CredentialProvider`] and normalizes
//!   every response into a payload or an [`ApiError`].
//! - [`Resource`] binds generic CRUD + search to one endpoint.
//! - Each service in [`services`] composes a `Resource` and adds its
//!   resource-specific calls.
//! - [`RelicArcade`] holds one instance of every service.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use relic_arcade_client::{ClientConfig, FileTokenStore, RelicArcade};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let store = Arc::new(FileTokenStore::open(&config.token_path));
//! let arcade = RelicArcade::new(&config, store)?;
//!
//! let featured = arcade.products().get_featured(None).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resource;
pub mod services;
pub mod session;
pub mod state;
pub mod upload;

pub use client::{ApiClient, Empty};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, Result};
pub use resource::Resource;
pub use services::{AuthError, AuthService, CartService, ProductService, UserService};
pub use session::{
    Anonymous, CredentialProvider, FileTokenStore, MemoryTokenStore, StaticToken, TokenError,
    TokenStore,
};
pub use state::RelicArcade;
pub use upload::UploadFile;
