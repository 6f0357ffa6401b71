//! Cart route handlers.
//!
//! Cart operations use HTMX: each mutation re-renders `<main>` and triggers
//! `cart-updated` so the count badge and other listeners refresh.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use local_shop_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::routes::{main_response, snapshot};
use crate::state::AppState;
use crate::views::PageView;

fn default_quantity() -> String {
    "1".to_string()
}

/// Add to cart form data.
///
/// `quantity` stays raw text; the controller validates it.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartTemplate {
    pub page: PageView,
}

/// Display the cart region.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop();
    CartTemplate {
        page: snapshot(shop).await,
    }
}

/// Add item to cart (HTMX).
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    add_breadcrumb(
        "cart",
        "Add to cart",
        Some(&[
            ("product_id", form.product_id.as_str()),
            ("quantity", form.quantity.as_str()),
        ]),
    );

    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.add_to_cart(&ProductId::new(form.product_id), &form.quantity)
        .await;
    main_response(shop, &mut events).await
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    add_breadcrumb(
        "cart",
        "Remove from cart",
        Some(&[("product_id", form.product_id.as_str())]),
    );

    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.remove_from_cart(&ProductId::new(form.product_id)).await;
    main_response(shop, &mut events).await
}
