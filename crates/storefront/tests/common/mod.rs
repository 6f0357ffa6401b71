//! In-process fake of the shop REST backend.
//!
//! Serves the same JSON shapes as the real backend on an ephemeral port so
//! the real `ShopClient` can be exercised end to end.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use local_shop_storefront::config::ShopApiConfig;
use serde_json::{Value, json};
use url::Url;

/// Mutable backend state shared with the test.
#[derive(Default)]
pub struct FakeShop {
    pub products: Vec<Value>,
    pub cart: Vec<Value>,
    pub orders: Vec<Value>,
    /// Next checkout is declined with this message.
    pub decline_checkout: Option<String>,
    /// Endpoints (by handler name) that answer 500.
    pub broken: Vec<&'static str>,
    /// How long checkout takes to answer.
    pub checkout_delay: Option<Duration>,
    pub requests: Vec<String>,
}

pub type Shared = Arc<Mutex<FakeShop>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub shop: Shared,
}

impl FakeBackend {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    pub fn api_config(&self) -> ShopApiConfig {
        ShopApiConfig {
            base_url: self.base_url(),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.shop.lock().unwrap().requests.clone()
    }
}

pub fn product(id: &str, name: &str, category: &str, price: f64, quantity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": category,
        "description": format!("Fresh {}", name.to_lowercase()),
        "price": price,
        "quantity": quantity,
        "available": quantity > 0,
        "discountPercentage": 0.0
    })
}

pub fn catalog() -> Vec<Value> {
    vec![
        product("P001", "Apples", "Fruit", 10.0, 5),
        product("P002", "Pears", "Fruit", 2.5, 2),
        product("P003", "Cheddar", "Dairy", 8.0, 10),
    ]
}

/// Start the fake backend with the default catalog.
pub async fn spawn_backend() -> FakeBackend {
    let shop: Shared = Arc::new(Mutex::new(FakeShop {
        products: catalog(),
        ..FakeShop::default()
    }));

    let api = Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/cart", get(get_cart).post(add_to_cart))
        .route("/cart/{id}", delete(remove_from_cart))
        .route("/orders", get(order_history).post(checkout))
        .with_state(shop.clone());
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend");
    });

    FakeBackend { addr, shop }
}

/// An address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

// =============================================================================
// Handlers
// =============================================================================

fn record(shop: &Shared, request: String, handler: &'static str) -> Result<(), Response> {
    let mut shop = shop.lock().unwrap();
    shop.requests.push(request);
    if shop.broken.contains(&handler) {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "exploded").into_response());
    }
    Ok(())
}

async fn list_products(
    State(shop): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let category = query.get("category").cloned();
    let request = category
        .as_ref()
        .map_or_else(|| "GET /products".to_string(), |c| format!("GET /products?category={c}"));
    if let Err(response) = record(&shop, request, "list_products") {
        return response;
    }

    let shop = shop.lock().unwrap();
    let products: Vec<Value> = shop
        .products
        .iter()
        .filter(|p| {
            category.as_deref().is_none_or(|c| {
                p["category"]
                    .as_str()
                    .is_some_and(|pc| pc.eq_ignore_ascii_case(c))
            })
        })
        .cloned()
        .collect();
    Json(products).into_response()
}

async fn get_product(State(shop): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(response) = record(&shop, format!("GET /products/{id}"), "get_product") {
        return response;
    }

    let shop = shop.lock().unwrap();
    shop.products
        .iter()
        .find(|p| p["id"] == id.as_str())
        .map_or_else(
            || (StatusCode::NOT_FOUND, Json(json!({"error": "Product not found"}))).into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

async fn get_cart(State(shop): State<Shared>) -> Response {
    if let Err(response) = record(&shop, "GET /cart".to_string(), "get_cart") {
        return response;
    }
    Json(shop.lock().unwrap().cart.clone()).into_response()
}

async fn add_to_cart(State(shop): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&shop, "POST /cart".to_string(), "add_to_cart") {
        return response;
    }

    let id = body["productId"].as_str().unwrap_or_default().to_string();
    let quantity = body["quantity"].as_u64().unwrap_or_default();

    let mut shop = shop.lock().unwrap();
    let Some(product) = shop.products.iter_mut().find(|p| p["id"] == id.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Product not found: {id}")})),
        )
            .into_response();
    };

    let stock = product["quantity"].as_u64().unwrap_or_default();
    if stock < quantity {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": format!("Insufficient stock: {id}")})),
        )
            .into_response();
    }
    product["quantity"] = json!(stock - quantity);
    let product = product.clone();

    if let Some(line) = shop.cart.iter_mut().find(|l| l["product"]["id"] == id.as_str()) {
        let current = line["quantity"].as_u64().unwrap_or_default();
        line["quantity"] = json!(current + quantity);
        line["product"] = product;
    } else {
        shop.cart.push(json!({
            "product": product,
            "quantity": quantity,
            "reservationTime": "2025-06-01T10:00:00"
        }));
    }
    Json(shop.cart.clone()).into_response()
}

async fn remove_from_cart(State(shop): State<Shared>, Path(id): Path<String>) -> Response {
    if let Err(response) = record(&shop, format!("DELETE /cart/{id}"), "remove_from_cart") {
        return response;
    }

    let mut shop = shop.lock().unwrap();
    shop.cart.retain(|l| l["product"]["id"] != id.as_str());
    Json(shop.cart.clone()).into_response()
}

async fn checkout(State(shop): State<Shared>, Json(body): Json<Value>) -> Response {
    if let Err(response) = record(&shop, "POST /orders".to_string(), "checkout") {
        return response;
    }

    let delay = shop.lock().unwrap().checkout_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut shop = shop.lock().unwrap();
    if let Some(message) = shop.decline_checkout.take() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": message, "success": false})),
        )
            .into_response();
    }
    if shop.cart.is_empty() {
        return Json(json!({"error": "Cart is empty", "success": false})).into_response();
    }

    let subtotal: f64 = shop
        .cart
        .iter()
        .map(|l| {
            l["product"]["price"].as_f64().unwrap_or_default()
                * l["quantity"].as_f64().unwrap_or_default()
        })
        .sum();
    let total = subtotal + (subtotal * 0.10 * 100.0).round() / 100.0;

    shop.cart.clear();
    shop.orders.push(json!({
        "orderId": "ORD-1",
        "orderDate": "2025-06-01T10:05:00",
        "total": total,
        "status": "CONFIRMED",
        "trackingNumber": "TRK-1",
        "email": body["customerData"]["email"].clone()
    }));

    Json(json!({
        "orderId": "ORD-1",
        "trackingNumber": "TRK-1",
        "total": total,
        "success": true
    }))
    .into_response()
}

async fn order_history(
    State(shop): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let email = query.get("email").cloned().unwrap_or_default();
    if let Err(response) = record(&shop, format!("GET /orders?email={email}"), "order_history") {
        return response;
    }

    let shop = shop.lock().unwrap();
    let orders: Vec<Value> = shop
        .orders
        .iter()
        .filter(|o| o["email"] == email.as_str())
        .cloned()
        .collect();
    Json(orders).into_response()
}
