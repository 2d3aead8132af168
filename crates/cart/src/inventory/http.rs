//! HTTP inventory client.
//!
//! Talks to a JSON REST service exposing `GET /stock/{id}` and
//! `GET /products/{id}`. Responses are not cached: stock must be fresh for
//! every validation.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use rocketshoes_core::{ProductId, ProductInfo, StockInfo};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{InventoryError, InventoryService};
use crate::config::InventoryConfig;

/// Client for the remote inventory service.
#[derive(Clone)]
pub struct HttpInventory {
    inner: Arc<HttpInventoryInner>,
}

struct HttpInventoryInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpInventory {
    /// Create a new inventory client.
    #[must_use]
    pub fn new(config: &InventoryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &InventoryConfig) -> Self {
        let mut base_url = config.base_url.clone();
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: Arc::new(HttpInventoryInner { client, base_url }),
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// GET a resource and decode it as JSON.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, InventoryError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = %status, url = %url, "Inventory service returned non-success status");
            return Err(InventoryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse inventory response"
            );
            InventoryError::Parse(e)
        })
    }
}

#[async_trait]
impl InventoryService for HttpInventory {
    #[instrument(skip_all, fields(product_id = %product_id))]
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, InventoryError> {
        let stock: StockInfo = self.get_json(&format!("stock/{product_id}")).await?;
        debug!(available = stock.amount, "Fetched stock");
        Ok(stock)
    }

    #[instrument(skip_all, fields(product_id = %product_id))]
    async fn get_product(&self, product_id: ProductId) -> Result<ProductInfo, InventoryError> {
        let product: ProductInfo = self.get_json(&format!("products/{product_id}")).await?;
        debug!(title = %product.title, "Fetched product");
        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(url: &str) -> InventoryConfig {
        InventoryConfig {
            base_url: Url::parse(url).unwrap(),
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = HttpInventory::new(&config("http://localhost:3333/api"));
        assert_eq!(client.base_url().as_str(), "http://localhost:3333/api/");
        assert_eq!(
            client.base_url().join("stock/1").unwrap().as_str(),
            "http://localhost:3333/api/stock/1"
        );
    }

    #[test]
    fn test_root_base_url_unchanged() {
        let client = HttpInventory::new(&config("http://localhost:3333"));
        assert_eq!(
            client.base_url().join("products/7").unwrap().as_str(),
            "http://localhost:3333/products/7"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_lookup_error() {
        // Reserve a free port, then release it so nothing is listening there
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = HttpInventory::new(&config(&format!("http://{addr}")));
        let result = client.get_stock(ProductId::new(1)).await;
        assert!(matches!(result, Err(InventoryError::Http(_))));
    }
}
