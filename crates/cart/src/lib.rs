//! RocketShoes cart state manager.
//!
//! Owns the authoritative in-memory cart, validates quantity changes against
//! the remote inventory service, and keeps a persisted snapshot in sync after
//! every successful mutation.
//!
//! # Architecture
//!
//! - [`CartStore`] - the single owner of the cart; injected into callers
//! - [`InventoryService`] - read-only stock and catalog lookups
//! - [`SnapshotStore`] - durable single-key cart snapshot
//! - [`Notifier`] - user-facing error messages (successes are silent)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_cart::{CartConfig, CartStore, HttpInventory, JsonFileStore, TracingNotifier};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::open(
//!     Arc::new(HttpInventory::new(&config.inventory)),
//!     Arc::new(JsonFileStore::new(&config.storage_dir)),
//!     Arc::new(TracingNotifier),
//! )?;
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, InventoryConfig};
pub use error::{CartError, CartOperation};
pub use inventory::{HttpInventory, InventoryError, InventoryService};
pub use notify::{MemoryNotifier, Notification, Notifier, Severity, TracingNotifier};
pub use storage::{CART_STORAGE_KEY, JsonFileStore, MemoryStore, SnapshotStore, StoreError};
pub use store::{CartStore, UpdateProductAmount};
