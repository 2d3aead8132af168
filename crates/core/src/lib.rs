//! RocketShoes Core - Shared types library.
//!
//! This crate provides the types shared by every RocketShoes component:
//! - `cart` - Cart state manager (stock validation, persistence, notifications)
//! - `cli` - Command-line front-end driving the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product ids, catalog/stock records, and the immutable [`Cart`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
