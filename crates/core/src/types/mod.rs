//! Core types for Relic Arcade.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod pagination;
pub mod price;
pub mod status;

pub use credential::{AccessToken, Password, TokenClaims};
pub use id::*;
pub use pagination::{PaginatedResponse, PaginationParams};
pub use price::Price;
pub use status::*;
