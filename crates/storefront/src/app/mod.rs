//! The storefront controller.
//!
//! [`ShopApp`] owns everything the shopper sees: the catalog, the cart, the
//! logged-in profile, which section is showing, the checkout form and any
//! toasts. Input events call its methods; each method validates locally,
//! calls the backend, replaces state from the response and publishes a
//! [`StateChange`] for every region that needs re-rendering.
//!
//! Backend failures never escape an operation. They become an error toast
//! and the state from before the operation is kept.
//!
//! State lives in a [`ShopState`] behind a lock that is released while the
//! backend is being called. Other requests keep reading and mutating in the
//! meantime; the checkout `Submitting` state is what keeps a second order
//! from going out.

mod events;
mod filter;
mod notify;


pub use events::StateChange;
pub use filter::{ProductFilter, filter_by_category, search_products};
pub use notify::{ERROR_TTL, Notifications, SUCCESS_TTL, Toast, ToastKind};

use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::Instant;

use local_shop_core::{CartTotals, Email, PaymentMethod, ProductId};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard, broadcast};
use tracing::instrument;

use crate::api::{ApiError, ShopBackend};
use crate::identity::IdentityProvider;
use crate::models::{CartLine, Customer, Invoice, OrderSummary, Product, cart_totals};

/// Capacity of the state-change channel.
const EVENT_CAPACITY: usize = 64;

/// The mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Products,
    Cart,
    Account,
}

impl Section {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Account => "account",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "cart" => Ok(Self::Cart),
            "account" => Ok(Self::Account),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}

/// Lifecycle of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Closed,
    Open,
    /// A checkout request is in flight; the submit control is disabled.
    Submitting,
}

/// What the account section knows about past orders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrderHistory {
    #[default]
    NotLoaded,
    Loaded(Vec<OrderSummary>),
    Failed,
}

/// Rejected quantity input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please enter a valid quantity")]
pub struct QuantityError;

/// Parse a quantity field: a whole number of at least one.
///
/// # Errors
///
/// Returns [`QuantityError`] for anything else.
pub fn parse_quantity(input: &str) -> Result<u32, QuantityError> {
    match input.trim().parse::<u32>() {
        Ok(quantity) if quantity >= 1 => Ok(quantity),
        _ => Err(QuantityError),
    }
}

/// Everything the shopper sees, guarded by the controller's lock.
///
/// Read it through [`ShopApp::state`]; all mutation goes through
/// [`ShopApp`] operations.
pub struct ShopState {
    identity: Box<dyn IdentityProvider>,
    products: Vec<Product>,
    categories: BTreeSet<String>,
    cart: Vec<CartLine>,
    current_user: Option<Customer>,
    section: Section,
    filter: ProductFilter,
    checkout: CheckoutState,
    checkout_form: Customer,
    invoice: Option<Invoice>,
    order_history: OrderHistory,
    notifications: Notifications,
    events: broadcast::Sender<StateChange>,
}

impl ShopState {
    /// Last known catalog, unfiltered.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Catalog after the active search or category filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        match &self.filter {
            ProductFilter::All => self.products.iter().collect(),
            ProductFilter::Search(term) => search_products(&self.products, term),
            ProductFilter::Category { products, .. } => products.iter().collect(),
        }
    }

    /// Distinct categories of the catalog, sorted.
    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    #[must_use]
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        cart_totals(&self.cart)
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&Customer> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub const fn checkout_state(&self) -> CheckoutState {
        self.checkout
    }

    /// Values shown in the checkout form.
    #[must_use]
    pub const fn checkout_form(&self) -> &Customer {
        &self.checkout_form
    }

    /// Confirmation of the last successful checkout, until dismissed.
    #[must_use]
    pub const fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    #[must_use]
    pub const fn order_history(&self) -> &OrderHistory {
        &self.order_history
    }

    #[must_use]
    pub const fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Drop expired toasts.
    pub fn prune_notifications(&mut self, now: Instant) {
        if self.notifications.prune(now) > 0 {
            self.emit(StateChange::Notifications);
        }
    }

    fn set_catalog(&mut self, products: Vec<Product>) {
        self.categories = products
            .iter()
            .filter(|p| !p.category.is_empty())
            .map(|p| p.category.clone())
            .collect();
        self.products = products;
        self.emit(StateChange::Products);
    }

    fn set_user(&mut self, user: Option<Customer>) {
        self.current_user = user;
        self.order_history = OrderHistory::NotLoaded;
        self.emit(StateChange::Account);
    }

    /// Replace the cart wholesale with a backend response.
    fn replace_cart(&mut self, lines: Vec<CartLine>) {
        self.cart = lines;
        self.emit(StateChange::Cart);
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notifications
            .push(ToastKind::Success, message, Instant::now());
        self.emit(StateChange::Notifications);
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications
            .push(ToastKind::Error, message, Instant::now());
        self.emit(StateChange::Notifications);
    }

    fn emit(&self, change: StateChange) {
        // No subscribers is fine.
        let _ = self.events.send(change);
    }
}

/// The storefront controller. See the module docs.
///
/// Operations take `&self`: the state lock is held only while reading or
/// applying state, never across a backend call, so one slow request does not
/// stall the others.
pub struct ShopApp<B> {
    backend: B,
    state: Mutex<ShopState>,
    events: broadcast::Sender<StateChange>,
}

impl<B: ShopBackend> ShopApp<B> {
    /// Create a controller with empty state. Call [`initialize`](Self::initialize)
    /// before first render.
    #[must_use]
    pub fn new(backend: B, identity: Box<dyn IdentityProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let state = ShopState {
            identity,
            products: Vec::new(),
            categories: BTreeSet::new(),
            cart: Vec::new(),
            current_user: None,
            section: Section::default(),
            filter: ProductFilter::default(),
            checkout: CheckoutState::default(),
            checkout_form: Customer::default(),
            invoice: None,
            order_history: OrderHistory::default(),
            notifications: Notifications::default(),
            events: events.clone(),
        };

        Self {
            backend,
            state: Mutex::new(state),
            events,
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.events.subscribe()
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Lock the state for reading. Keep the guard short-lived.
    pub async fn state(&self) -> MutexGuard<'_, ShopState> {
        self.state.lock().await
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load the catalog, the cart and the saved profile.
    ///
    /// Never fails: a catalog that cannot be loaded is reported and left
    /// empty, a cart that cannot be loaded is left empty.
    #[instrument(skip(self))]
    pub async fn initialize(&self) {
        self.load_products().await;
        self.load_cart().await;

        let restored = {
            let mut state = self.state.lock().await;
            let saved = state.identity.current_user();
            match saved {
                Ok(Some(user)) => {
                    state.current_user = Some(user);
                    state.emit(StateChange::Account);
                    true
                }
                Ok(None) => false,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable saved profile");
                    false
                }
            }
        };
        if restored {
            self.load_order_history().await;
        }

        let state = self.state.lock().await;
        tracing::info!(
            products = state.products.len(),
            cart_lines = state.cart.len(),
            logged_in = state.current_user.is_some(),
            "Storefront initialized"
        );
    }

    /// Refresh the catalog (and category list) from the backend.
    ///
    /// Returns whether the refresh succeeded.
    #[instrument(skip(self))]
    pub async fn load_products(&self) -> bool {
        let result = self.backend.list_products().await;

        let mut state = self.state.lock().await;
        match result {
            Ok(products) => {
                state.set_catalog(products);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                state.notify_error("Failed to load products. Please refresh the page.");
                false
            }
        }
    }

    /// Refresh the cart from the backend. Failures are only logged.
    #[instrument(skip(self))]
    pub async fn load_cart(&self) {
        match self.backend.get_cart().await {
            Ok(lines) => self.state.lock().await.replace_cart(lines),
            Err(e) => tracing::warn!(error = %e, "Failed to load cart"),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub async fn show_section(&self, section: Section) {
        let mut state = self.state.lock().await;
        if state.section != section {
            state.section = section;
            state.emit(StateChange::Section);
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Narrow the grid to products whose name or description contains
    /// `term`. Purely local.
    pub async fn search(&self, term: &str) {
        let term = term.trim().to_lowercase();
        let mut state = self.state.lock().await;
        state.filter = if term.is_empty() {
            ProductFilter::All
        } else {
            ProductFilter::Search(term)
        };
        state.emit(StateChange::Products);
    }

    /// Narrow the grid to one category via the backend, falling back to a
    /// local filter when the backend call fails. An empty category clears
    /// the filter.
    #[instrument(skip(self))]
    pub async fn filter_category(&self, category: &str) {
        let category = category.trim();
        if category.is_empty() {
            let mut state = self.state.lock().await;
            state.filter = ProductFilter::All;
            state.emit(StateChange::Products);
            return;
        }

        let result = self.backend.search_by_category(category).await;

        let mut state = self.state.lock().await;
        let products = match result {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "Category search failed, filtering locally");
                filter_by_category(&state.products, category)
            }
        };
        state.filter = ProductFilter::Category {
            category: category.to_string(),
            products,
        };
        state.emit(StateChange::Products);
    }

    /// Fetch the latest copy of one product, updating the catalog entry.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the catalog is left unchanged.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn view_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let product = self.backend.get_product(id).await?;

        let mut state = self.state.lock().await;
        if let Some(known) = state.products.iter_mut().find(|p| p.id == product.id)
            && *known != product
        {
            *known = product.clone();
            state.emit(StateChange::Products);
        }
        Ok(product)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity_input` units of a product.
    ///
    /// The quantity must be a whole number of at least one and no more than
    /// the locally known stock; otherwise nothing is sent to the backend.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_to_cart(&self, id: &ProductId, quantity_input: &str) {
        let (quantity, name) = {
            let mut state = self.state.lock().await;

            let quantity = match parse_quantity(quantity_input) {
                Ok(quantity) => quantity,
                Err(e) => {
                    state.notify_error(e.to_string());
                    return;
                }
            };

            let Some(product) = state.products.iter().find(|p| &p.id == id) else {
                state.notify_error("Product not found");
                return;
            };

            if product.quantity < quantity {
                let message = format!(
                    "Only {} units available for {}",
                    product.quantity, product.name
                );
                state.notify_error(message);
                return;
            }
            (quantity, product.name.clone())
        };

        match self.backend.add_to_cart(id, quantity).await {
            Ok(lines) => {
                self.state.lock().await.replace_cart(lines);
                self.reload_catalog().await;
                self.state
                    .lock()
                    .await
                    .notify_success(format!("{name} added to cart!"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add item to cart");
                self.state
                    .lock()
                    .await
                    .notify_error(format!("Failed to add item: {e}"));
            }
        }
    }

    /// Remove a product from the cart.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_from_cart(&self, id: &ProductId) {
        match self.backend.remove_from_cart(id).await {
            Ok(lines) => {
                self.state.lock().await.replace_cart(lines);
                self.reload_catalog().await;
                self.state.lock().await.notify_success("Item removed from cart");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to remove item from cart");
                self.state
                    .lock()
                    .await
                    .notify_error(format!("Failed to remove item: {e}"));
            }
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Open the checkout form, pre-filled from the logged-in profile.
    pub async fn open_checkout(&self) {
        let mut state = self.state.lock().await;
        if state.cart.is_empty() {
            state.notify_error("Your cart is empty");
            return;
        }
        if state.checkout == CheckoutState::Submitting {
            return;
        }

        if let Some(user) = state.current_user.clone() {
            state.checkout_form = user;
        }
        state.checkout = CheckoutState::Open;
        state.emit(StateChange::Checkout);
    }

    /// Close the checkout form. Ignored while a submission is in flight.
    pub async fn cancel_checkout(&self) {
        let mut state = self.state.lock().await;
        if state.checkout == CheckoutState::Open {
            state.checkout = CheckoutState::Closed;
            state.emit(StateChange::Checkout);
        }
    }

    /// Submit the order.
    ///
    /// While the request is in flight the checkout is `Submitting` and a
    /// second submission is turned away. On success the cart is cleared,
    /// the invoice is kept for display and the catalog is reloaded. On any
    /// failure the cart is left as it was. Either way the submit control is
    /// enabled again afterwards.
    #[instrument(skip(self, customer))]
    pub async fn checkout(&self, customer: Customer, payment_method: &str) {
        let (customer, payment_method) = {
            let mut state = self.state.lock().await;
            if state.checkout == CheckoutState::Submitting {
                state.notify_error("Your order is already being processed");
                return;
            }

            let payment_method = match PaymentMethod::parse(payment_method) {
                Ok(method) => method,
                Err(e) => {
                    state.notify_error(e.to_string());
                    return;
                }
            };

            state.checkout_form = customer;
            if let Err(e) = state.checkout_form.validate() {
                state.notify_error(e.to_string());
                return;
            }

            if state.cart.is_empty() {
                state.notify_error("Your cart is empty");
                return;
            }

            state.checkout = CheckoutState::Submitting;
            state.emit(StateChange::Checkout);
            (state.checkout_form.clone(), payment_method)
        };

        let result = self.backend.checkout(&customer, &payment_method).await;

        let logged_in = {
            let mut state = self.state.lock().await;
            match result {
                Ok(invoice) => {
                    tracing::info!(order_id = ?invoice.order_id, "Order placed");
                    state.checkout = CheckoutState::Closed;
                    state.checkout_form = Customer::default();
                    state.invoice = Some(invoice);
                    state.cart.clear();
                    state.emit(StateChange::Checkout);
                    state.emit(StateChange::Invoice);
                    state.emit(StateChange::Cart);
                    state.current_user.is_some()
                }
                Err(e) => {
                    tracing::error!(error = %e, "Checkout failed");
                    state.checkout = CheckoutState::Open;
                    state.emit(StateChange::Checkout);
                    state.notify_error(format!("Checkout failed: {e}"));
                    return;
                }
            }
        };

        self.reload_catalog().await;
        if logged_in {
            self.load_order_history().await;
        }
    }

    /// Dismiss the order confirmation and go back to the catalog.
    pub async fn close_invoice(&self) {
        {
            let mut state = self.state.lock().await;
            if state.invoice.take().is_some() {
                state.emit(StateChange::Invoice);
            }
        }
        self.show_section(Section::Products).await;
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn login(&self, email: &str, password: &str) {
        {
            let mut state = self.state.lock().await;
            let result = state.identity.login(email, password);
            match result {
                Ok(user) => {
                    state.set_user(Some(user));
                    state.notify_success("Logged in successfully!");
                }
                Err(e) => {
                    state.notify_error(e.to_string());
                    return;
                }
            }
        }
        self.load_order_history().await;
    }

    pub async fn register(&self, customer: Customer) {
        {
            let mut state = self.state.lock().await;
            let result = state.identity.register(customer);
            match result {
                Ok(user) => {
                    state.set_user(Some(user));
                    state.notify_success("Account created successfully!");
                }
                Err(e) => {
                    state.notify_error(e.to_string());
                    return;
                }
            }
        }
        self.load_order_history().await;
    }

    pub async fn logout(&self) {
        let mut state = self.state.lock().await;
        if let Err(e) = state.identity.logout() {
            tracing::error!(error = %e, "Failed to clear saved profile");
            state.notify_error(e.to_string());
            return;
        }
        state.set_user(None);
        state.notify_success("Logged out successfully!");
    }

    /// Load the logged-in shopper's past orders. No-op when logged out.
    ///
    /// The result is dropped if a different shopper is logged in by the
    /// time the backend answers.
    #[instrument(skip(self))]
    pub async fn load_order_history(&self) {
        let Some(email) = self
            .state
            .lock()
            .await
            .current_user
            .as_ref()
            .map(|user| user.email.clone())
        else {
            return;
        };

        let history = match Email::parse(&email) {
            Ok(parsed) => match self.backend.order_history(&parsed).await {
                Ok(orders) => OrderHistory::Loaded(orders),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load order history");
                    OrderHistory::Failed
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Saved profile has an invalid email");
                OrderHistory::Failed
            }
        };

        let mut state = self.state.lock().await;
        if state.current_user.as_ref().is_some_and(|user| user.email == email) {
            state.order_history = history;
            state.emit(StateChange::Account);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Stock changes after every cart mutation; show the refreshed full
    /// catalog.
    async fn reload_catalog(&self) {
        if self.load_products().await {
            self.state.lock().await.filter = ProductFilter::All;
        }
    }
}
