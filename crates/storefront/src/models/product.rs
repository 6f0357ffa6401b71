//! Catalog products.

use local_shop_core::{Price, ProductId, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const fn default_available() -> bool {
    true
}

/// A product as served by `GET /products`.
///
/// `quantity` is the backend's count of units still available; it drops as
/// shoppers reserve stock in their carts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discounted_price: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<Decimal>,
    pub quantity: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl Product {
    /// The undiscounted unit price.
    #[must_use]
    pub const fn list_price(&self) -> Price {
        Price::new(self.price)
    }

    /// The sale price, if the backend sent one or a discount percentage.
    #[must_use]
    pub fn sale_price(&self) -> Option<Price> {
        if let Some(discounted) = self.discounted_price {
            return Some(Price::new(discounted));
        }

        self.discount_percentage
            .filter(|pct| pct.is_sign_positive() && !pct.is_zero())
            .map(|pct| {
                let factor = Decimal::ONE - pct / Decimal::ONE_HUNDRED;
                Price::new(round_money(self.price.saturating_mul(factor)))
            })
    }

    /// Price shown to shoppers: the sale price when it undercuts the list
    /// price, otherwise the list price.
    #[must_use]
    pub fn effective_price(&self) -> Price {
        match self.sale_price() {
            Some(sale) if sale < self.list_price() => sale,
            _ => self.list_price(),
        }
    }

    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.effective_price() < self.list_price()
    }

    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.quantity == 0 || !self.available
    }

    /// Case-insensitive substring match on name and description.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }
}
