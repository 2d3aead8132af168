//! Integration tests for the RocketShoes cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! Tests run the real [`HttpInventory`](rocketshoes_cart::HttpInventory) and
//! [`JsonFileStore`](rocketshoes_cart::JsonFileStore) against a
//! [`FakeInventory`] server bound to an ephemeral localhost port and a temp
//! directory. No external services are needed.
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end add/remove/update flows

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_cart::InventoryConfig;
use rocketshoes_core::{ProductId, ProductInfo, StockInfo};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

/// In-memory catalog and stock served over HTTP.
///
/// Clones share state, so a test can keep a handle and change stock while
/// the server is running.
#[derive(Clone, Default)]
pub struct FakeInventory {
    inner: Arc<FakeInventoryInner>,
}

#[derive(Default)]
struct FakeInventoryInner {
    products: RwLock<HashMap<ProductId, ProductInfo>>,
    stock: RwLock<HashMap<ProductId, u32>>,
    requests: AtomicUsize,
}

impl FakeInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with its available stock.
    pub async fn add_product(&self, id: i32, title: &str, stock: u32) {
        let id = ProductId::new(id);
        let product = ProductInfo {
            id,
            title: title.to_string(),
            price: Decimal::new(17990, 2),
            image: format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg"),
        };
        self.inner.products.write().await.insert(id, product);
        self.inner.stock.write().await.insert(id, stock);
    }

    /// Change the available stock of a registered product.
    pub async fn set_stock(&self, id: i32, stock: u32) {
        self.inner
            .stock
            .write()
            .await
            .insert(ProductId::new(id), stock);
    }

    /// Number of HTTP requests served so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// Start serving on an ephemeral localhost port.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn spawn(&self) -> std::io::Result<FakeInventoryServer> {
        let app = Router::new()
            .route("/stock/{id}", get(stock))
            .route("/products/{id}", get(product))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(FakeInventoryServer { addr, handle })
    }
}

/// A running [`FakeInventory`] server. Stops when dropped.
pub struct FakeInventoryServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FakeInventoryServer {
    /// Inventory configuration pointing at this server.
    ///
    /// # Panics
    ///
    /// Never in practice: the URL is built from a bound socket address.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn config(&self) -> InventoryConfig {
        InventoryConfig {
            base_url: Url::parse(&format!("http://{}", self.addr))
                .expect("socket address forms a valid URL"),
        }
    }
}

impl Drop for FakeInventoryServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn stock(
    State(inventory): State<FakeInventory>,
    Path(id): Path<i32>,
) -> Result<Json<StockInfo>, StatusCode> {
    inventory.inner.requests.fetch_add(1, Ordering::SeqCst);
    let id = ProductId::new(id);
    let amount = inventory
        .inner
        .stock
        .read()
        .await
        .get(&id)
        .copied()
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(StockInfo { id, amount }))
}

async fn product(
    State(inventory): State<FakeInventory>,
    Path(id): Path<i32>,
) -> Result<Json<ProductInfo>, StatusCode> {
    inventory.inner.requests.fetch_add(1, Ordering::SeqCst);
    inventory
        .inner
        .products
        .read()
        .await
        .get(&ProductId::new(id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
