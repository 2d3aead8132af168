//! Immutable cart snapshots.
//!
//! A [`Cart`] is never edited in place. Every transition (`with_entry`,
//! `with_product`, `with_amount`, `without`) builds a fresh snapshot from the previous one,
//! so a value handed to a reader or to persistence can never change under it.
//!
//! # Invariants
//!
//! - At most one [`CartEntry`] per [`ProductId`]
//! - Every entry has `amount >= 1`
//!
//! Both are checked when a snapshot is deserialized and by every transition,
//! so a cart that was built can always be read back. See [`CartSnapshotError`].

use std::collections::HashSet;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::ProductInfo;

/// Errors raised when a list of entries does not form a valid cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartSnapshotError {
    /// The same product appears more than once.
    #[error("product {0} appears more than once in the cart")]
    DuplicateProduct(ProductId),
    /// An entry carries a zero quantity.
    #[error("product {0} has a quantity of zero")]
    ZeroAmount(ProductId),
}

/// One product's presence in the cart plus its requested quantity.
///
/// Serialized flat (`{id, title, price, image, amount}`), the same shape as
/// the catalog record with the quantity appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub image: String,
    pub amount: u32,
}

impl CartEntry {
    /// Create an entry from catalog data with the given quantity.
    #[must_use]
    pub fn from_product(product: ProductInfo, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }

    /// Copy of this entry with a different quantity.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// The ordered collection of entries held for the session.
///
/// Order is insertion order; it is preserved across transitions but carries
/// no meaning beyond display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Look up the entry for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Whether the cart holds an entry for the product.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.amount)).sum()
    }

    /// New snapshot with `entry` appended, or replacing the entry for the
    /// same product in place.
    ///
    /// # Errors
    ///
    /// Returns [`CartSnapshotError::ZeroAmount`] if the entry's quantity is 0.
    pub fn with_entry(&self, entry: CartEntry) -> Result<Self, CartSnapshotError> {
        if entry.amount == 0 {
            return Err(CartSnapshotError::ZeroAmount(entry.id));
        }
        Ok(self.upsert(entry))
    }

    /// New snapshot holding exactly one unit of `product`.
    #[must_use]
    pub fn with_product(&self, product: ProductInfo) -> Self {
        self.upsert(CartEntry::from_product(product, 1))
    }

    /// New snapshot with the product's quantity set to `amount`.
    ///
    /// Returns `None` if the product is not in the cart.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: NonZeroU32) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }

        let entries = self
            .entries
            .iter()
            .map(|entry| {
                if entry.id == id {
                    entry.with_amount(amount.get())
                } else {
                    entry.clone()
                }
            })
            .collect();

        Some(Self { entries })
    }

    /// New snapshot without the product.
    ///
    /// Returns `None` if the product is not in the cart.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }

        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();

        Some(Self { entries })
    }

    fn upsert(&self, entry: CartEntry) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(slot) => *slot = entry,
            None => entries.push(entry),
        }
        Self { entries }
    }
}

impl TryFrom<Vec<CartEntry>> for Cart {
    type Error = CartSnapshotError;

    fn try_from(entries: Vec<CartEntry>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.amount == 0 {
                return Err(CartSnapshotError::ZeroAmount(entry.id));
            }
            if !seen.insert(entry.id) {
                return Err(CartSnapshotError::DuplicateProduct(entry.id));
            }
        }
        Ok(Self { entries })
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
