//! Cart lines and totals.

use chrono::{Duration, NaiveDateTime};
use local_shop_core::{CartTotals, Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// How long the backend holds stock for a cart line.
pub const RESERVATION_MINUTES: i64 = 15;

/// One product and quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    /// When the backend reserved the stock for this line.
    #[serde(
        default,
        deserialize_with = "crate::models::timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub reservation_time: Option<NaiveDateTime>,
}

impl CartLine {
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            reservation_time: None,
        }
    }

    /// List price times quantity.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.product.list_price()
    }

    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price() * self.quantity
    }

    /// Whole minutes left on the stock reservation, or `None` if the backend
    /// did not send a reservation time.
    #[must_use]
    pub fn reservation_minutes_left(&self, now: NaiveDateTime) -> Option<i64> {
        self.reservation_time.map(|reserved| {
            let expires = reserved + Duration::minutes(RESERVATION_MINUTES);
            (expires - now).num_minutes().max(0)
        })
    }

    #[must_use]
    pub fn is_for(&self, id: &ProductId) -> bool {
        &self.product.id == id
    }
}

/// Subtotal, 10% tax and total over the cart's list prices.
#[must_use]
pub fn cart_totals(lines: &[CartLine]) -> CartTotals {
    CartTotals::from_lines(lines.iter().map(|line| (line.unit_price(), line.quantity)))
}
