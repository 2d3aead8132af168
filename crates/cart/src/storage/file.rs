//! JSON file snapshot store.
//!
//! The snapshot lives at `<dir>/rocketshoes-cart.json`. Writes go to a
//! sibling temp file that is renamed over the target, so a crash mid-write
//! leaves the previous snapshot intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rocketshoes_core::Cart;
use tracing::debug;

use super::{CART_STORAGE_KEY, SnapshotStore, StoreError};

const SNAPSHOT_FILE: &str = "rocketshoes-cart.json";

/// Snapshot store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the snapshot inside `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SNAPSHOT_FILE),
        }
    }

    /// Full path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Cart>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key = CART_STORAGE_KEY, path = %self.path.display(), "No cart snapshot yet");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let cart: Cart = serde_json::from_str(&contents)?;
        debug!(key = CART_STORAGE_KEY, entries = cart.len(), "Loaded cart snapshot");
        Ok(Some(cart))
    }

    fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let payload = serde_json::to_vec(cart)?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, payload).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(key = CART_STORAGE_KEY, entries = cart.len(), "Saved cart snapshot");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::{CartEntry, ProductId, ProductInfo};
    use rust_decimal::Decimal;

    use super::*;

    fn sample_cart() -> Cart {
        Cart::new().with_entry(CartEntry::from_product(
            ProductInfo {
                id: ProductId::new(1),
                title: "Tênis de Caminhada".to_string(),
                price: Decimal::new(1799, 1),
                image: "https://example.com/1.jpg".to_string(),
            },
            2,
        ))
        .unwrap()
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));

        let cart = sample_cart();
        store.save(&cart).unwrap();

        assert_eq!(store.load().unwrap(), Some(cart));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(&sample_cart()).unwrap();
        store.save(&Cart::new()).unwrap();

        assert_eq!(store.load().unwrap(), Some(Cart::new()));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_load_corrupt_snapshot_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        // Parent "directory" is a regular file
        let store = JsonFileStore::new(&blocker);
        assert!(matches!(
            store.save(&Cart::new()),
            Err(StoreError::Io { .. })
        ));
    }
}
