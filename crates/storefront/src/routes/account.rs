//! Account route handlers.
//!
//! Identity is the mock provider: any email logs in.

use axum::{Form, extract::State, response::Response};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::Customer;
use crate::routes::main_response;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl From<RegisterForm> for Customer {
    fn from(form: RegisterForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
        }
    }
}

/// Log in (HTMX).
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.login(&form.email, &form.password).await;
    if let Some(user) = shop.state().await.current_user() {
        set_sentry_user(&user.email);
    }
    main_response(shop, &mut events).await
}

/// Register and log in (HTMX).
#[instrument(skip(state, form))]
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.register(form.into()).await;
    if let Some(user) = shop.state().await.current_user() {
        set_sentry_user(&user.email);
    }
    main_response(shop, &mut events).await
}

/// Log out (HTMX).
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Response {
    let shop = state.shop();
    let mut events = shop.subscribe();
    shop.logout().await;
    if shop.state().await.current_user().is_none() {
        clear_sentry_user();
    }
    main_response(shop, &mut events).await
}
