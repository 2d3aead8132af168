//! Inventory service port.
//!
//! Read-only stock and catalog lookups consumed by the cart. Lookups are
//! idempotent and side-effect free; the cart never caches or retries them.

mod http;

pub use http::HttpInventory;

use async_trait::async_trait;
use rocketshoes_core::{ProductId, ProductInfo, StockInfo};
use thiserror::Error;

/// Errors that can occur when querying the inventory service.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("invalid inventory URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Port for stock and catalog lookups.
///
/// Implemented by [`HttpInventory`] and injected into the
/// [`CartStore`](crate::CartStore).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Current available quantity for a product.
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, InventoryError>;

    /// Catalog data for a product.
    async fn get_product(&self, product_id: ProductId) -> Result<ProductInfo, InventoryError>;
}
