//! Local Shop storefront library.
//!
//! A server-rendered front end for the Local Shop REST backend: browse the
//! catalog, manage a cart and check out. The binary wires these modules to
//! a TCP listener; integration tests drive them directly.
//!
//! # Layout
//!
//! - [`api`]: `reqwest` client for the backend, behind the [`api::ShopBackend`] trait
//! - [`app`]: the [`app::ShopApp`] controller that owns all shopper-visible state
//! - [`identity`]: stub login/registration with a persisted profile
//! - [`views`] and [`routes`]: askama views and axum handlers (HTMX fragments)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod filters;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;

use std::path::Path;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the full router: routes, static files and the middleware stack.
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request_id::make_span))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
