//! In-process snapshot slot.

use std::sync::{Arc, Mutex};

use rocketshoes_core::Cart;

use super::{SnapshotStore, StoreError};

/// Snapshot store held in memory (single slot, overwrite semantics).
///
/// Clones share the slot, so tests can keep a handle and inspect what the
/// cart committed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Cart>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing snapshot, as if from a previous session.
    #[must_use]
    pub fn with_snapshot(cart: Cart) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(cart))),
        }
    }

    /// Current stored snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Cart> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Cart>, StoreError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        *slot = Some(cart.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_clones_share_slot() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.save(&Cart::new()).unwrap();
        assert_eq!(handle.snapshot(), Some(Cart::new()));
    }
}
