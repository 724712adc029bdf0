//! Resource services built on the transport client.
//!
//! # Services
//!
//! - `auth` - Login, registration, password recovery, logout
//! - `cart` - Current user's cart
//! - `product` - Catalog browsing, filtering and image upload
//! - `user` - Profile, password and avatar
//!
//! Each service composes a [`Resource`](crate::resource::Resource) for the
//! generic CRUD + search operations of its endpoint and adds its own
//! resource-specific calls.

pub mod auth;
pub mod cart;
pub mod product;
pub mod user;

pub use auth::{AuthError, AuthService};
pub use cart::CartService;
pub use product::ProductService;
pub use user::UserService;
