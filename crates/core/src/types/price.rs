//! Decimal money amounts and the cart totals arithmetic.
//!
//! All shop prices are in a single currency (the backend has no currency
//! field), so [`Price`] is a thin wrapper over [`Decimal`]. Floating point is
//! only ever seen on the wire; everything in memory is decimal.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Flat sales tax applied to every cart subtotal (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Round an amount to cents, halves away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A money amount in the shop's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Amount with two decimal places and no currency symbol (`"33.00"`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        format!("{:.2}", round_money(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_fixed())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

// Amounts come straight from backend JSON, so arithmetic saturates at
// `Decimal::MAX` instead of panicking.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Subtotal, tax and grand total of a cart.
///
/// `subtotal` is the exact sum of `unit price * quantity`; `tax` is
/// `subtotal * TAX_RATE` rounded to cents; `total` is `subtotal + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
    /// Number of units across all lines.
    pub item_count: u32,
}

impl CartTotals {
    /// Compute totals from `(unit price, quantity)` pairs.
    #[must_use]
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (Price, u32)>,
    {
        let (subtotal, item_count) = lines
            .into_iter()
            .fold((Price::ZERO, 0_u32), |(sum, count), (price, quantity)| {
                (sum + price * quantity, count.saturating_add(quantity))
            });

        let tax = Price::new(round_money(subtotal.amount().saturating_mul(TAX_RATE)));

        Self {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count,
        }
    }
}
