//! Catalog and inventory records returned by the inventory service.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Catalog data for a product.
///
/// Fetched only when a product is first added to the cart. The price is a
/// display value carried through to the cart entry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    /// Product image URL.
    pub image: String,
}

/// Available inventory for a product at query time.
///
/// Never cached: every cart operation that needs it fetches a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: ProductId,
    pub amount: u32,
}

impl StockInfo {
    /// Whether `requested` units can be satisfied by this stock level.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_info_accepts_numeric_price() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe-1.jpg"
        }"#;
        let product: ProductInfo = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(1799, 1));
    }

    #[test]
    fn test_stock_info_covers() {
        let stock = StockInfo {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
    }

    #[test]
    fn test_stock_info_rejects_negative_amount() {
        let json = r#"{"id": 1, "amount": -1}"#;
        assert!(serde_json::from_str::<StockInfo>(json).is_err());
    }
}
