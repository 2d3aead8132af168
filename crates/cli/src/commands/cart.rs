//! Cart commands.
//!
//! # Environment Variables
//!
//! - `INVENTORY_API_URL` - Base URL of the inventory service
//! - `CART_STORAGE_DIR` - Directory holding the cart snapshot

use std::io::Write;
use std::sync::Arc;

use rocketshoes_cart::{
    CartConfig, CartStore, HttpInventory, JsonFileStore, TracingNotifier, UpdateProductAmount,
};
use rocketshoes_core::{Cart, CartEntry, ProductId};
use serde::Serialize;

use super::CliError;

/// Printable cart summary.
#[derive(Debug, Serialize)]
struct CartView<'a> {
    entries: &'a [CartEntry],
    distinct_products: usize,
    total_quantity: u64,
}

impl<'a> From<&'a Cart> for CartView<'a> {
    fn from(cart: &'a Cart) -> Self {
        Self {
            entries: cart.entries(),
            distinct_products: cart.len(),
            total_quantity: cart.total_quantity(),
        }
    }
}

/// Open the cart configured by the environment.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the stored snapshot
/// cannot be read.
pub fn open() -> Result<CartStore, CliError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(
        inventory = %config.inventory.base_url,
        storage_dir = %config.storage_dir.display(),
        "Opening cart"
    );

    let store = CartStore::open(
        Arc::new(HttpInventory::new(&config.inventory)),
        Arc::new(JsonFileStore::new(&config.storage_dir)),
        Arc::new(TracingNotifier),
    )?;
    Ok(store)
}

/// Add one unit of a product.
pub async fn add(store: &CartStore, product_id: ProductId) -> Result<(), CliError> {
    store.add_product(product_id).await?;
    tracing::info!(%product_id, "Product added");
    Ok(())
}

/// Remove a product.
pub async fn remove(store: &CartStore, product_id: ProductId) -> Result<(), CliError> {
    store.remove_product(product_id).await?;
    tracing::info!(%product_id, "Product removed");
    Ok(())
}

/// Set a product's quantity. Quantities below 1 leave the cart unchanged.
pub async fn update(store: &CartStore, product_id: ProductId, amount: i32) -> Result<(), CliError> {
    store
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await?;
    if amount < 1 {
        tracing::debug!(%product_id, amount, "Quantity below 1, update ignored");
    } else {
        tracing::info!(%product_id, amount, "Product quantity updated");
    }
    Ok(())
}

/// Print the cart as pretty JSON on stdout.
pub fn show(store: &CartStore) -> Result<(), CliError> {
    let cart = store.cart();
    let mut stdout = std::io::stdout().lock();
    render(&cart, &mut stdout)?;
    Ok(())
}

fn render(cart: &Cart, out: &mut impl Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &CartView::from(cart))?;
    writeln!(out)
}
