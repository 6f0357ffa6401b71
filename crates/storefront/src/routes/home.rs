//! Full page and section navigation.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::app::Section;
use crate::error::{AppError, Result};
use crate::routes::{IndexTemplate, main_response, snapshot};
use crate::state::AppState;

/// Display the whole storefront.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let shop = state.shop();
    IndexTemplate {
        page: snapshot(shop).await,
    }
}

/// Switch to another section (HTMX).
#[instrument(skip(state))]
pub async fn show_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let section: Section = name
        .parse()
        .map_err(|_| AppError::NotFound(format!("section {name}")))?;

    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.show_section(section).await;
    Ok(main_response(shop, &mut events).await)
}
