//! Request and response records for the storefront API.
//!
//! These are plain attribute bags mirroring the backend schema. Field names
//! are camelCase on the wire; no client-side invariants are enforced.

pub mod auth;
pub mod cart;
pub mod product;
pub mod user;

pub use auth::*;
pub use cart::*;
pub use product::*;
pub use user::*;
