//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use local_shop_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::snapshot;
use crate::state::AppState;
use crate::views::{PageView, ProductCardView};

/// Grid filter query parameters.
///
/// `category` wins when both are sent; an empty `category` clears the
/// filter.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub page: PageView,
}

/// Single product card fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_card.html")]
pub struct ProductCardTemplate {
    pub product: ProductCardView,
}

/// Display the product grid, applying a search or category filter.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    let shop = state.shop();

    if let Some(category) = query.category {
        shop.filter_category(&category).await;
    } else if let Some(search) = query.search {
        shop.search(&search).await;
    }

    ProductGridTemplate {
        page: snapshot(shop).await,
    }
}

/// Display one product card with fresh stock.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = ProductId::new(id);
    let product = state
        .shop()
        .view_product(&id)
        .await
        .map_err(|e| AppError::from_api(e, format!("product {id}")))?;

    Ok(ProductCardTemplate {
        product: ProductCardView::from(&product),
    })
}
