//! Request bodies and order payloads.

use chrono::NaiveDateTime;
use local_shop_core::{OrderId, OrderStatus, PaymentMethod, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Customer;

/// Body of `POST /cart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest<'a> {
    pub product_id: &'a ProductId,
    pub quantity: u32,
}

/// Body of `POST /orders`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest<'a> {
    pub customer_data: &'a Customer,
    pub payment_method: &'a PaymentMethod,
}

/// Order confirmation returned by checkout.
///
/// A failed checkout comes back with `success: false` and an `error`
/// message; the other fields are only present on success.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Invoice {
    #[must_use]
    pub fn total_paid(&self) -> Price {
        self.total.map(Price::new).unwrap_or_default()
    }
}

/// A past order, as listed in the account section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    #[serde(
        default,
        deserialize_with = "crate::models::timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_date: Option<NaiveDateTime>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_body() {
        let id = ProductId::new("P001");
        let body = AddToCartRequest {
            product_id: &id,
            quantity: 2,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"productId": "P001", "quantity": 2})
        );
    }

    #[test]
    fn test_checkout_body() {
        let customer = Customer {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "1".to_string(),
            address: "2".to_string(),
        };
        let payment = PaymentMethod::parse("credit-card").unwrap();
        let body = CheckoutRequest {
            customer_data: &customer,
            payment_method: &payment,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["customerData"]["email"], "ada@example.com");
        assert_eq!(value["paymentMethod"], "credit-card");
    }

    #[test]
    fn test_successful_invoice() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"orderId":"ORD-1","trackingNumber":"TRK-9","total":33.0,"success":true}"#,
        )
        .unwrap();
        assert!(invoice.success);
        assert_eq!(invoice.total_paid(), Price::from_cents(3300));
        assert_eq!(invoice.order_id, Some(OrderId::new("ORD-1")));
    }

    #[test]
    fn test_failed_invoice() {
        let invoice: Invoice =
            serde_json::from_str(r#"{"error":"Payment failed: declined","success":false}"#)
                .unwrap();
        assert!(!invoice.success);
        assert_eq!(invoice.error.as_deref(), Some("Payment failed: declined"));
        assert_eq!(invoice.total_paid(), Price::ZERO);
    }

    #[test]
    fn test_order_summary() {
        let order: OrderSummary = serde_json::from_str(
            r#"{"orderId":"ORD-7","orderDate":"2025-01-02T03:04:05","total":12.5,"status":"DELIVERED"}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.order_date.is_some());
        assert!(order.tracking_number.is_none());
    }
}
