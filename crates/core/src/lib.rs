//! Relic Arcade Core - Shared types library.
//!
//! This crate provides the value types shared by every Relic Arcade component:
//! - `client` - Typed access layer over the storefront REST API
//! - `cli` - Command-line front end built on the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no token
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, access tokens, statuses and
//!   the pagination envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
