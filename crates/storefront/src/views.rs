//! Display data for templates.
//!
//! Views are plain owned structs built from a [`ShopState`] snapshot so the
//! controller lock can be released before rendering. Money is formatted here
//! and templates never do arithmetic.

use std::time::Instant;

use chrono::NaiveDateTime;

use crate::app::{CheckoutState, OrderHistory, ShopState, ToastKind};
use crate::models::{CartLine, Customer, Invoice, OrderSummary, Product};

/// Products at or below this stock level get a "low stock" hint.
const LOW_STOCK_THRESHOLD: u32 = 5;

/// Payment methods offered in the checkout form, as `(value, label)`.
pub const PAYMENT_METHODS: &[(&str, &str)] = &[("credit-card", "Credit Card")];

/// Product card display data.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    /// List price, shown struck through when the product is on sale.
    pub original_price: Option<String>,
    pub stock: u32,
    pub out_of_stock: bool,
    pub low_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let out_of_stock = product.is_out_of_stock();
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.effective_price().to_string(),
            original_price: product
                .has_discount()
                .then(|| product.list_price().to_string()),
            stock: product.quantity,
            out_of_stock,
            low_stock: !out_of_stock && product.quantity <= LOW_STOCK_THRESHOLD,
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub minutes_left: Option<i64>,
}

impl CartLineView {
    fn new(line: &CartLine, now: NaiveDateTime) -> Self {
        Self {
            product_id: line.product.id.to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price().to_string(),
            line_total: line.line_total().to_string(),
            minutes_left: line.reservation_minutes_left(now),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A `<select>` option.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Checkout form display data.
#[derive(Debug, Clone)]
pub struct CheckoutView {
    pub open: bool,
    pub submitting: bool,
    pub form: Customer,
    pub total: String,
    pub payment_methods: Vec<SelectOption>,
}

/// Order confirmation display data.
#[derive(Debug, Clone)]
pub struct InvoiceView {
    pub order_id: String,
    pub tracking_number: String,
    pub total: String,
}

impl From<&Invoice> for InvoiceView {
    fn from(invoice: &Invoice) -> Self {
        Self {
            order_id: invoice
                .order_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            tracking_number: invoice.tracking_number.clone().unwrap_or_default(),
            total: invoice.total_paid().to_string(),
        }
    }
}

/// Past order display data.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order_id: String,
    pub date: Option<String>,
    pub total: String,
    pub status: String,
    pub tracking_number: Option<String>,
}

impl From<&OrderSummary> for OrderView {
    fn from(order: &OrderSummary) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            date: order.order_date.map(|d| d.format("%Y-%m-%d").to_string()),
            total: local_shop_core::Price::new(order.total).to_string(),
            status: order.status.to_string(),
            tracking_number: order.tracking_number.clone(),
        }
    }
}

/// Account section display data.
#[derive(Debug, Clone)]
pub struct AccountView {
    pub user: Option<Customer>,
    /// `None` while history has not been loaded.
    pub orders: Option<Vec<OrderView>>,
    pub orders_failed: bool,
}

/// Toast display data.
#[derive(Debug, Clone)]
pub struct ToastView {
    pub id: u64,
    pub class: &'static str,
    pub message: String,
}

/// Everything the page template needs.
#[derive(Debug, Clone)]
pub struct PageView {
    pub section: &'static str,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<SelectOption>,
    pub search: String,
    pub cart: CartView,
    pub checkout: CheckoutView,
    pub invoice: Option<InvoiceView>,
    pub account: AccountView,
    pub toasts: Vec<ToastView>,
}

impl PageView {
    /// Snapshot the controller.
    ///
    /// `now` decides which toasts are still showing; `clock` is the wall
    /// time reservation countdowns are measured against.
    #[must_use]
    pub fn build(app: &ShopState, now: Instant, clock: NaiveDateTime) -> Self {
        let totals = app.totals();

        let cart = CartView {
            lines: app
                .cart()
                .iter()
                .map(|line| CartLineView::new(line, clock))
                .collect(),
            subtotal: totals.subtotal.to_fixed(),
            tax: totals.tax.to_fixed(),
            total: totals.total.to_fixed(),
            item_count: totals.item_count,
        };

        let checkout = CheckoutView {
            open: app.checkout_state() != CheckoutState::Closed,
            submitting: app.checkout_state() == CheckoutState::Submitting,
            form: app.checkout_form().clone(),
            total: totals.total.to_string(),
            payment_methods: PAYMENT_METHODS
                .iter()
                .map(|(value, label)| SelectOption {
                    value: (*value).to_string(),
                    label: (*label).to_string(),
                    selected: false,
                })
                .collect(),
        };

        let selected_category = app
            .filter()
            .category()
            .unwrap_or_default()
            .to_lowercase();

        let (orders, orders_failed) = match app.order_history() {
            OrderHistory::NotLoaded => (None, false),
            OrderHistory::Loaded(orders) => (Some(orders.iter().map(OrderView::from).collect()), false),
            OrderHistory::Failed => (None, true),
        };

        Self {
            section: app.section().as_str(),
            products: app
                .visible_products()
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
            categories: app
                .categories()
                .iter()
                .map(|category| SelectOption {
                    value: category.clone(),
                    label: category.clone(),
                    selected: category.to_lowercase() == selected_category,
                })
                .collect(),
            search: app.filter().search_term().unwrap_or_default().to_string(),
            cart,
            checkout,
            invoice: app.invoice().map(InvoiceView::from),
            account: AccountView {
                user: app.current_user().cloned(),
                orders,
                orders_failed,
            },
            toasts: app
                .notifications()
                .active(now)
                .map(|toast| ToastView {
                    id: toast.id,
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    },
                    message: toast.message.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::product::tests::product;

    #[test]
    fn test_product_card_shows_sale_price() {
        let mut p = product("P1", "Honey", "Pantry", 1000, 3);
        p.discounted_price = Some(Decimal::new(850, 2));

        let card = ProductCardView::from(&p);
        assert_eq!(card.price, "$8.50");
        assert_eq!(card.original_price.as_deref(), Some("$10.00"));
        assert!(card.low_stock);
        assert!(!card.out_of_stock);
    }

    #[test]
    fn test_product_card_out_of_stock() {
        let card = ProductCardView::from(&product("P1", "Honey", "Pantry", 1000, 0));
        assert!(card.out_of_stock);
        assert!(!card.low_stock);
        assert!(card.original_price.is_none());
    }

    #[test]
    fn test_invoice_view() {
        let invoice = Invoice {
            order_id: Some("ORD-5".into()),
            tracking_number: Some("TRK-5".to_string()),
            total: Some(Decimal::new(33, 0)),
            success: true,
            error: None,
        };
        let view = InvoiceView::from(&invoice);
        assert_eq!(view.order_id, "ORD-5");
        assert_eq!(view.total, "$33.00");
    }
}
