//! `reqwest` implementation of [`ShopBackend`].

use std::sync::Arc;

use local_shop_core::{Email, PaymentMethod, ProductId};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::{ApiError, ShopBackend};
use crate::config::ShopApiConfig;
use crate::models::{AddToCartRequest, CartLine, CheckoutRequest, Customer, Invoice, OrderSummary, Product};

/// Maximum number of body characters copied into log lines.
const LOG_BODY_LIMIT: usize = 500;

/// Client for the shop REST API.
///
/// Cheap to clone. Keeps a cookie store so the backend can tie the cart to
/// this client's session.
#[derive(Clone)]
pub struct ShopClient {
    inner: Arc<ShopClientInner>,
}

struct ShopClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ShopClient {
    /// Create a new client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the HTTP client fails to build.
    pub fn new(config: &ShopApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            inner: Arc::new(ShopClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The backend base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn transport_error(&self, source: reqwest::Error) -> ApiError {
        ApiError::Transport {
            base_url: self.inner.base_url.to_string(),
            source,
        }
    }

    /// Send a request and decode a JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Shop backend unreachable");
            self.transport_error(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "Shop backend returned non-success status"
            );
            return Err(ApiError::server(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "Failed to parse shop backend response"
            );
            ApiError::Decode(e.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        self.send(self.inner.client.get(url)).await
    }
}

impl ShopBackend for ShopClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.get_json(self.endpoint(&["products"])).await?;
        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get_json(self.endpoint(&["products", id.as_str()])).await
    }

    #[instrument(skip(self))]
    async fn search_by_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint(&["products"]);
        url.query_pairs_mut().append_pair("category", category);
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    async fn get_cart(&self) -> Result<Vec<CartLine>, ApiError> {
        let lines: Option<Vec<CartLine>> = self.get_json(self.endpoint(&["cart"])).await?;
        Ok(lines.unwrap_or_default())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn add_to_cart(&self, id: &ProductId, quantity: u32) -> Result<Vec<CartLine>, ApiError> {
        let body = AddToCartRequest {
            product_id: id,
            quantity,
        };
        let request = self.inner.client.post(self.endpoint(&["cart"])).json(&body);
        let lines: Option<Vec<CartLine>> = self.send(request).await?;
        Ok(lines.unwrap_or_default())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn remove_from_cart(&self, id: &ProductId) -> Result<Vec<CartLine>, ApiError> {
        let request = self
            .inner
            .client
            .delete(self.endpoint(&["cart", id.as_str()]));
        let lines: Option<Vec<CartLine>> = self.send(request).await?;
        Ok(lines.unwrap_or_default())
    }

    #[instrument(skip(self, customer), fields(payment_method = %payment_method))]
    async fn checkout(
        &self,
        customer: &Customer,
        payment_method: &PaymentMethod,
    ) -> Result<Invoice, ApiError> {
        let body = CheckoutRequest {
            customer_data: customer,
            payment_method,
        };
        let request = self.inner.client.post(self.endpoint(&["orders"])).json(&body);
        let invoice: Invoice = self.send(request).await?;

        if !invoice.success {
            let message = invoice
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(%message, "Checkout rejected by backend");
            return Err(ApiError::CheckoutRejected(message));
        }

        Ok(invoice)
    }

    #[instrument(skip(self, email))]
    async fn order_history(&self, email: &Email) -> Result<Vec<OrderSummary>, ApiError> {
        let mut url = self.endpoint(&["orders"]);
        url.query_pairs_mut().append_pair("email", email.as_str());
        let orders: Option<Vec<OrderSummary>> = self.get_json(url).await?;
        Ok(orders.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ShopClient {
        ShopClient::new(&ShopApiConfig {
            base_url: Url::parse(base).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let client = client("http://localhost:8080/api");
        assert_eq!(
            client.endpoint(&["products"]).as_str(),
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = client("http://localhost:8080/api/");
        assert_eq!(
            client.endpoint(&["cart", "P001"]).as_str(),
            "http://localhost:8080/api/cart/P001"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = client("http://localhost:8080/api");
        assert_eq!(
            client.endpoint(&["products", "a/b c"]).as_str(),
            "http://localhost:8080/api/products/a%2Fb%20c"
        );
    }
}
