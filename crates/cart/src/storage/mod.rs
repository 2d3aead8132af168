//! Persisted cart snapshot.
//!
//! A single fixed key identifies the snapshot; there is no multi-cart keying.
//! Saving overwrites the whole snapshot.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use rocketshoes_core::Cart;
use thiserror::Error;

/// Key identifying the cart snapshot in local storage.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur when reading or writing the snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("invalid cart snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store is unavailable.
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
}

/// Port for the durable cart snapshot.
pub trait SnapshotStore: Send + Sync {
    /// Last committed snapshot, or `None` on first run.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot exists but cannot be read or
    /// does not form a valid cart.
    fn load(&self) -> Result<Option<Cart>, StoreError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot cannot be written.
    fn save(&self, cart: &Cart) -> Result<(), StoreError>;
}
