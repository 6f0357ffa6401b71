//! State-change events published by the controller.

use core::fmt;

/// A region of the UI whose backing state changed.
///
/// Renderers subscribe to these instead of being called directly by the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateChange {
    Products,
    Cart,
    Section,
    Account,
    Checkout,
    Invoice,
    Notifications,
}

impl StateChange {
    /// Event name used in `HX-Trigger` headers.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Products => "products-updated",
            Self::Cart => "cart-updated",
            Self::Section => "section-changed",
            Self::Account => "account-updated",
            Self::Checkout => "checkout-updated",
            Self::Invoice => "invoice-updated",
            Self::Notifications => "toast",
        }
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
