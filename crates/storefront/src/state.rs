//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ShopClient;
use crate::app::ShopApp;
use crate::config::StorefrontConfig;

/// The controller as wired in production.
pub type Shop = ShopApp<ShopClient>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. There is exactly one [`Shop`]; it guards its
/// own state, so handlers share it without an outer lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: Shop,
}

impl AppState {
    /// Create a new application state around an initialized controller.
    #[must_use]
    pub fn new(config: StorefrontConfig, shop: Shop) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, shop }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The storefront controller.
    #[must_use]
    pub fn shop(&self) -> &Shop {
        &self.inner.shop
    }
}
