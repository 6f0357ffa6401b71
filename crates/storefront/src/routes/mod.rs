//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Full page
//! GET  /health             - Liveness check
//!
//! # Catalog
//! GET  /products           - Product grid fragment (query: search, category)
//! GET  /products/{id}      - Single product card fragment
//! POST /section/{name}     - Switch section (products|cart|account)
//!
//! # Cart
//! GET  /cart               - Cart fragment
//! POST /cart/add           - Add to cart (form: product_id, quantity)
//! POST /cart/remove        - Remove from cart (form: product_id)
//!
//! # Checkout
//! POST /checkout/open      - Open the checkout form
//! POST /checkout/cancel    - Close the checkout form
//! POST /checkout           - Place the order
//! POST /invoice/close      - Dismiss the order confirmation
//!
//! # Account
//! POST /account/login      - Log in (form: email, password)
//! POST /account/register   - Register (form: name, email, phone, address)
//! POST /account/logout     - Log out
//! ```
//!
//! Every `POST` re-renders `<main>` so all regions stay consistent, and
//! names the regions that changed in an `HX-Trigger` header.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use std::collections::BTreeSet;
use std::time::Instant;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
};
use tokio::sync::broadcast;

use crate::app::StateChange;
use crate::filters;
use crate::state::{AppState, Shop};
use crate::views::PageView;

/// Header HTMX reads client-side events from.
pub const HX_TRIGGER: &str = "HX-Trigger";

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageView,
}

/// `<main>` fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/main.html")]
pub struct MainTemplate {
    pub page: PageView,
}

/// Snapshot the controller for rendering, dropping expired toasts first.
pub async fn snapshot(shop: &Shop) -> PageView {
    let now = Instant::now();
    let mut state = shop.state().await;
    state.prune_notifications(now);
    PageView::build(&state, now, chrono::Local::now().naive_local())
}

/// Drain pending state changes into a comma-separated `HX-Trigger` value.
fn trigger_value(events: &mut broadcast::Receiver<StateChange>) -> Option<String> {
    let mut changed = BTreeSet::new();
    while let Ok(change) = events.try_recv() {
        changed.insert(change);
    }

    if changed.is_empty() {
        return None;
    }

    Some(
        changed
            .iter()
            .map(|change| change.event_name())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Render `<main>` after a mutation, announcing what changed.
///
/// `events` must have been subscribed before the mutation ran. Changes made
/// by requests running at the same time may be announced too; the page
/// reflects them either way.
pub async fn main_response(
    shop: &Shop,
    events: &mut broadcast::Receiver<StateChange>,
) -> Response {
    let page = snapshot(shop).await;
    let body = MainTemplate { page };

    match trigger_value(events) {
        Some(trigger) => (AppendHeaders([(HX_TRIGGER, trigger)]), body).into_response(),
        None => body.into_response(),
    }
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the shop backend.
pub async fn health() -> &'static str {
    "ok"
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::submit))
        .route("/open", post(checkout::open))
        .route("/cancel", post(checkout::cancel))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(account::login))
        .route("/register", post(account::register))
        .route("/logout", post(account::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .route("/section/{name}", post(home::show_section))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/invoice/close", post(checkout::close_invoice))
        .nest("/account", account_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_value_dedups_and_orders() {
        let (tx, mut rx) = broadcast::channel(8);
        for change in [
            StateChange::Notifications,
            StateChange::Cart,
            StateChange::Products,
            StateChange::Cart,
        ] {
            let _ = tx.send(change);
        }

        assert_eq!(
            trigger_value(&mut rx).as_deref(),
            Some("products-updated, cart-updated, toast")
        );
        assert_eq!(trigger_value(&mut rx), None);
    }
}
