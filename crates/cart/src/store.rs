//! The cart store.
//!
//! [`CartStore`] is the single owner of the cart. Each operation is an atomic
//! transition `Cart x Input -> Cart' | Cart + Error`:
//!
//! 1. Stock (and, for new products, catalog data) is fetched from the
//!    [`InventoryService`]
//! 2. A fresh snapshot is computed from the current one
//! 3. The snapshot is written to the [`SnapshotStore`]
//! 4. Only then does it become the in-memory cart
//!
//! On any failure the cart keeps its last good snapshot and the matching
//! message goes to the [`Notifier`].
//!
//! Mutations are serialized by a writer lock held across the remote lookups,
//! so two overlapping `add_product` calls for the same product cannot both
//! pass the stock check against the same starting quantity.

use std::num::NonZeroU32;
use std::sync::Arc;

use rocketshoes_core::{Cart, ProductId, ProductInfo};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::error::{CartError, CartOperation};
use crate::inventory::InventoryService;
use crate::notify::Notifier;
use crate::storage::{SnapshotStore, StoreError};

/// Input for [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Absolute quantity to set. Values below 1 are ignored.
    pub amount: i32,
}

/// Owner of the shopping cart.
///
/// Cheap to clone; every clone shares the same cart. Hand a clone to each
/// component that needs the cart instead of reaching for a global.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    inventory: Arc<dyn InventoryService>,
    storage: Arc<dyn SnapshotStore>,
    notifier: Arc<dyn Notifier>,
    cart: watch::Sender<Cart>,
    writer: Mutex<()>,
}

impl CartStore {
    /// Open the cart from the persisted snapshot (empty if none exists).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a snapshot exists but cannot be read.
    pub fn open(
        inventory: Arc<dyn InventoryService>,
        storage: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StoreError> {
        let cart = storage.load()?.unwrap_or_default();
        info!(
            entries = cart.len(),
            total_quantity = cart.total_quantity(),
            "Cart opened"
        );

        let (sender, _) = watch::channel(cart);
        Ok(Self {
            inner: Arc::new(CartStoreInner {
                inventory,
                storage,
                notifier,
                cart: sender,
                writer: Mutex::new(()),
            }),
        })
    }

    /// Current cart snapshot.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.inner.cart.borrow().clone()
    }

    /// Receiver that observes every committed snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.cart.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is appended with quantity 1. An existing
    /// entry is incremented by 1 if stock allows, otherwise the call fails
    /// with [`CartError::OutOfStock`].
    ///
    /// # Errors
    ///
    /// Returns the failure after it has been reported to the notifier.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _writer = self.inner.writer.lock().await;
        let result = self.try_add(product_id).await;
        self.report(result)
    }

    /// Remove a product from the cart.
    ///
    /// No remote lookups are made.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] (after notifying) if the product is
    /// not in the cart.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _writer = self.inner.writer.lock().await;
        let result = self.try_remove(product_id);
        self.report(result)
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// Quantities below 1 are a silent no-op: no lookup, no notification.
    ///
    /// # Errors
    ///
    /// Returns the failure after it has been reported to the notifier.
    #[instrument(skip_all, fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let Some(amount) = u32::try_from(update.amount).ok().and_then(NonZeroU32::new) else {
            debug!("Ignoring quantity below 1");
            return Ok(());
        };

        let _writer = self.inner.writer.lock().await;
        let result = self.try_update(update.product_id, amount).await;
        self.report(result)
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let operation = CartOperation::Add;
        let current = self.cart();

        let stock = self
            .inner
            .inventory
            .get_stock(product_id)
            .await
            .map_err(|source| CartError::LookupFailed {
                operation,
                product_id,
                source,
            })?;

        let next = match current.get(product_id) {
            None => {
                let product = self
                    .inner
                    .inventory
                    .get_product(product_id)
                    .await
                    .map_err(|source| CartError::LookupFailed {
                        operation,
                        product_id,
                        source,
                    })?;
                current.with_product(keyed(product, product_id))
            }
            Some(entry) if entry.amount < stock.amount => current
                .with_amount(product_id, NonZeroU32::MIN.saturating_add(entry.amount))
                .ok_or(CartError::NotFound {
                    operation,
                    product_id,
                })?,
            Some(entry) => {
                return Err(CartError::OutOfStock {
                    operation,
                    product_id,
                    requested: entry.amount.saturating_add(1),
                    available: stock.amount,
                });
            }
        };

        self.commit(operation, next)
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let operation = CartOperation::Remove;
        let next = self
            .cart()
            .without(product_id)
            .ok_or(CartError::NotFound {
                operation,
                product_id,
            })?;

        self.commit(operation, next)
    }

    async fn try_update(&self, product_id: ProductId, amount: NonZeroU32) -> Result<(), CartError> {
        let operation = CartOperation::Update;
        let current = self.cart();

        let stock = self
            .inner
            .inventory
            .get_stock(product_id)
            .await
            .map_err(|source| CartError::LookupFailed {
                operation,
                product_id,
                source,
            })?;

        if !stock.covers(amount.get()) {
            return Err(CartError::OutOfStock {
                operation,
                product_id,
                requested: amount.get(),
                available: stock.amount,
            });
        }

        let next = current
            .with_amount(product_id, amount)
            .ok_or(CartError::NotFound {
                operation,
                product_id,
            })?;

        self.commit(operation, next)
    }

    /// Persist `next`, then make it the current cart.
    fn commit(&self, operation: CartOperation, next: Cart) -> Result<(), CartError> {
        self.inner
            .storage
            .save(&next)
            .map_err(|source| CartError::Persistence { operation, source })?;

        debug!(
            %operation,
            entries = next.len(),
            total_quantity = next.total_quantity(),
            "Cart committed"
        );
        self.inner.cart.send_replace(next);
        Ok(())
    }

    /// Send a failed operation's message to the notifier.
    fn report(&self, result: Result<(), CartError>) -> Result<(), CartError> {
        if let Err(e) = &result {
            warn!(error = %e, "Cart operation rejected");
            self.inner.notifier.notify(e.notification());
        }
        result
    }
}

/// Key catalog data by the requested id so the one-entry-per-product
/// invariant holds even if the service echoes a different id.
fn keyed(product: ProductInfo, product_id: ProductId) -> ProductInfo {
    if product.id != product_id {
        warn!(
            requested = %product_id,
            returned = %product.id,
            "Inventory returned a product with a different id"
        );
    }
    ProductInfo {
        id: product_id,
        ..product
    }
}
