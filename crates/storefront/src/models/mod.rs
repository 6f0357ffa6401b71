//! Domain models exchanged with the shop backend.
//!
//! Field names follow the backend's camelCase JSON. Money arrives as JSON
//! numbers and is converted to `Decimal` at the edge; nothing downstream
//! touches floats.

pub mod cart;
pub mod customer;
pub mod order;
pub mod product;
mod timestamp;

pub use cart::{CartLine, RESERVATION_MINUTES, cart_totals};
pub use customer::{Customer, CustomerError};
pub use order::{AddToCartRequest, CheckoutRequest, Invoice, OrderSummary};
pub use product::Product;
