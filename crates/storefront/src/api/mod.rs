//! Client for the shop's REST backend.
//!
//! # Architecture
//!
//! - [`ShopClient`] maps each storefront action to exactly one HTTP call
//!   against the configured base URL and decodes the JSON body.
//! - [`ShopBackend`] is the seam the controller depends on, so cart and
//!   checkout logic can be exercised without a network.
//! - Failures never retry; they surface immediately as [`ApiError`].
//!
//! # Endpoints
//!
//! ```text
//! GET    /products                 all products
//! GET    /products/{id}            one product
//! GET    /products?category={c}    products in a category
//! GET    /cart                     current cart lines
//! POST   /cart                     add {productId, quantity}, returns cart
//! DELETE /cart/{productId}         remove a product, returns cart
//! POST   /orders                   checkout {customerData, paymentMethod}
//! GET    /orders?email={email}     order history
//! ```

mod backend;
mod client;
mod error;

pub use backend::ShopBackend;
pub use client::ShopClient;
pub use error::ApiError;
