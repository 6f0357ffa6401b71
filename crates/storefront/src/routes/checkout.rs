//! Checkout route handlers.

use axum::{Form, extract::State, response::Response};
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::models::Customer;
use crate::routes::main_response;
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub payment_method: String,
}

impl CheckoutForm {
    fn into_parts(self) -> (Customer, String) {
        (
            Customer {
                name: self.name,
                email: self.email,
                phone: self.phone,
                address: self.address,
            },
            self.payment_method,
        )
    }
}

/// Open the checkout form (HTMX).
#[instrument(skip(state))]
pub async fn open(State(state): State<AppState>) -> Response {
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.open_checkout().await;
    main_response(shop, &mut events).await
}

/// Close the checkout form (HTMX).
#[instrument(skip(state))]
pub async fn cancel(State(state): State<AppState>) -> Response {
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.cancel_checkout().await;
    main_response(shop, &mut events).await
}

/// Place the order (HTMX).
#[instrument(skip(state, form))]
pub async fn submit(State(state): State<AppState>, Form(form): Form<CheckoutForm>) -> Response {
    add_breadcrumb(
        "checkout",
        "Submit order",
        Some(&[("payment_method", form.payment_method.as_str())]),
    );

    let (customer, payment_method) = form.into_parts();
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.checkout(customer, &payment_method).await;
    main_response(shop, &mut events).await
}

/// Dismiss the order confirmation (HTMX).
#[instrument(skip(state))]
pub async fn close_invoice(State(state): State<AppState>) -> Response {
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.close_invoice().await;
    main_response(shop, &mut events).await
}
