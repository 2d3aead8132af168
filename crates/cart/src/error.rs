//! Cart operation errors.
//!
//! Every failure is handled inside [`CartStore`](crate::CartStore): the cart
//! stays at its last good snapshot, the matching message goes to the
//! [`Notifier`](crate::Notifier), and the error is handed back to the caller
//! for inspection only.

use rocketshoes_core::ProductId;
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::notify::{Notification, messages};
use crate::storage::StoreError;

/// The cart operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Errors produced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The remote stock or catalog lookup failed.
    #[error("{operation} failed: inventory lookup for product {product_id}: {source}")]
    LookupFailed {
        operation: CartOperation,
        product_id: ProductId,
        #[source]
        source: InventoryError,
    },

    /// The requested quantity exceeds available stock.
    #[error("{operation} failed: product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        operation: CartOperation,
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("{operation} failed: product {product_id} is not in the cart")]
    NotFound {
        operation: CartOperation,
        product_id: ProductId,
    },

    /// Writing the cart snapshot failed; the in-memory cart was not changed.
    #[error("{operation} failed: could not persist cart: {source}")]
    Persistence {
        operation: CartOperation,
        #[source]
        source: StoreError,
    },
}

impl CartError {
    /// The operation that failed.
    #[must_use]
    pub const fn operation(&self) -> CartOperation {
        match self {
            Self::LookupFailed { operation, .. }
            | Self::OutOfStock { operation, .. }
            | Self::NotFound { operation, .. }
            | Self::Persistence { operation, .. } => *operation,
        }
    }

    /// The user-facing notification for this failure.
    #[must_use]
    pub fn notification(&self) -> Notification {
        let message = match self {
            Self::OutOfStock { .. } => messages::OUT_OF_STOCK,
            Self::LookupFailed { operation, .. }
            | Self::NotFound { operation, .. }
            | Self::Persistence { operation, .. } => match operation {
                CartOperation::Add => messages::ADD_FAILED,
                CartOperation::Remove => messages::REMOVE_FAILED,
                CartOperation::Update => messages::UPDATE_FAILED,
            },
        };
        Notification::error(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotFound {
            operation: CartOperation::Remove,
            product_id: ProductId::new(2),
        };
        assert_eq!(err.to_string(), "remove failed: product 2 is not in the cart");

        let err = CartError::OutOfStock {
            operation: CartOperation::Add,
            product_id: ProductId::new(1),
            requested: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "add failed: product 1 out of stock: requested 2, available 1"
        );
        assert_eq!(err.operation(), CartOperation::Add);
    }

    #[test]
    fn test_notification_messages_per_class() {
        let lookup = CartError::LookupFailed {
            operation: CartOperation::Add,
            product_id: ProductId::new(1),
            source: InventoryError::Status {
                status: 404,
                url: "http://localhost:3333/stock/1".to_string(),
            },
        };
        assert_eq!(lookup.notification().message, messages::ADD_FAILED);

        let not_found = CartError::NotFound {
            operation: CartOperation::Remove,
            product_id: ProductId::new(1),
        };
        assert_eq!(not_found.notification().message, messages::REMOVE_FAILED);

        let missing_update = CartError::NotFound {
            operation: CartOperation::Update,
            product_id: ProductId::new(1),
        };
        assert_eq!(missing_update.notification().message, messages::UPDATE_FAILED);

        let out_of_stock = CartError::OutOfStock {
            operation: CartOperation::Update,
            product_id: ProductId::new(1),
            requested: 3,
            available: 2,
        };
        assert_eq!(out_of_stock.notification().message, messages::OUT_OF_STOCK);
    }
}
