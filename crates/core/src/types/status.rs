//! Order statuses and payment method selection.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Shipment status of a placed order, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Dispatched,
    Delivered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Dispatched => "Dispatched",
            Self::Delivered => "Delivered",
        })
    }
}

/// Error returned when no payment method was selected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please select a payment method")]
pub struct MissingPaymentMethod;

/// The payment method picked in the checkout form.
///
/// The value is opaque to the storefront and forwarded to the backend as-is;
/// the only rule is that something was selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethod(String);

impl PaymentMethod {
    /// Parse a form selection.
    ///
    /// # Errors
    ///
    /// Returns [`MissingPaymentMethod`] if the selection is blank.
    pub fn parse(selection: &str) -> Result<Self, MissingPaymentMethod> {
        let trimmed = selection.trim();
        if trimmed.is_empty() {
            return Err(MissingPaymentMethod);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
