//! The backend seam the controller is written against.

use std::future::Future;

use local_shop_core::{Email, PaymentMethod, ProductId};

use crate::api::ApiError;
use crate::models::{CartLine, Customer, Invoice, OrderSummary, Product};

/// Operations the storefront needs from the shop backend.
///
/// [`ShopClient`](crate::api::ShopClient) is the production implementation.
/// Every cart mutation returns the complete cart as the backend now sees it.
pub trait ShopBackend: Send + Sync {
    /// List every product in the catalog.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch one product.
    fn get_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// List the products in one category.
    fn search_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch the current cart.
    fn get_cart(&self) -> impl Future<Output = Result<Vec<CartLine>, ApiError>> + Send;

    /// Add `quantity` units of a product, returning the updated cart.
    fn add_to_cart(
        &self,
        id: &ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<Vec<CartLine>, ApiError>> + Send;

    /// Remove a product from the cart, returning the updated cart.
    fn remove_from_cart(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Vec<CartLine>, ApiError>> + Send;

    /// Place an order for the current cart.
    ///
    /// Only returns `Ok` for invoices flagged `success`.
    fn checkout(
        &self,
        customer: &Customer,
        payment_method: &PaymentMethod,
    ) -> impl Future<Output = Result<Invoice, ApiError>> + Send;

    /// Orders previously placed with this email.
    fn order_history(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<Vec<OrderSummary>, ApiError>> + Send;
}
