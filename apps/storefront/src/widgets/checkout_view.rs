//! # Checkout View
//!
//! The cart modal: one line per cart item, the order total, counter buttons
//! and the delivery form.
//!
//! ## Rendering From Updates
//! ```text
//! CartStore ──CartUpdate──► CheckoutView::apply
//!
//!   CheckoutOpened     lines rebuilt from the snapshot, title "Your order"
//!   ItemChanged        that line's count and price refreshed, or the line
//!                      dropped when removed; total refreshed
//!   SubmissionStarted  submit button busy
//!   SubmissionFailed   busy cleared, form kept
//!   OrderPlaced        lines cleared, title "Success!" if still on screen
//!   CheckoutClosed     everything cleared
//! ```
//! Counter buttons do not touch the store directly: they emit `cart-adjust`.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use storefront_checkout::{
    CartEvent, CartStore, CartUpdate, CheckoutPhase, CheckoutResult, OrderForm, OrderReceipt,
};
use storefront_core::events::lock;
use storefront_core::{
    CartSnapshot, EventChannel, EventName, LineItemChange, LineItemChangeKind, Money, Subscription,
};
use tracing::debug;

pub const ORDER_TITLE: &str = "Your order";
pub const SUCCESS_TITLE: &str = "Success!";
pub const SUCCESS_MESSAGE: &str =
    "Order successful! Your order is being cooked :) We'll notify you about delivery time shortly.";

/// Payload of `cart-adjust`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartAdjust {
    pub product_id: String,
    pub delta: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutLine {
    pub product_id: String,
    pub name: String,
    pub count: u32,
    /// `unit price × count`
    pub price: Money,
}

/// Everything the modal shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutViewState {
    pub phase: CheckoutPhase,
    pub lines: Vec<CheckoutLine>,
    pub total: Money,
    /// Submit button shows its busy state.
    pub submitting: bool,
    /// Body text replacing the form after a successful order.
    pub message: Option<&'static str>,
    /// Why the last submission failed, for display next to the form.
    pub last_error: Option<String>,
}

impl Default for CheckoutViewState {
    fn default() -> Self {
        CheckoutViewState {
            phase: CheckoutPhase::Closed,
            lines: Vec::new(),
            total: Money::zero(),
            submitting: false,
            message: None,
            last_error: None,
        }
    }
}

impl CheckoutViewState {
    pub fn title(&self) -> Option<&'static str> {
        match self.phase {
            CheckoutPhase::Closed => None,
            CheckoutPhase::Succeeded => Some(SUCCESS_TITLE),
            CheckoutPhase::Open | CheckoutPhase::Submitting => Some(ORDER_TITLE),
        }
    }

    pub fn line(&self, product_id: &str) -> Option<&CheckoutLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn rebuild(&mut self, cart: &CartSnapshot) {
        self.lines = cart
            .items
            .iter()
            .map(|item| CheckoutLine {
                product_id: item.product_id.clone(),
                name: item.name.clone(),
                count: item.count,
                price: item.line_total,
            })
            .collect();
        self.total = cart.total_price;
    }

    fn refresh_line(&mut self, change: &LineItemChange, cart: &CartSnapshot) {
        match change.kind {
            LineItemChangeKind::Removed => {
                self.lines.retain(|l| l.product_id != change.product_id);
            }
            LineItemChangeKind::Added | LineItemChangeKind::Updated => {
                match self.lines.iter_mut().find(|l| l.product_id == change.product_id) {
                    Some(line) => {
                        line.count = change.count;
                        line.price = change.line_total;
                    }
                    // Added from elsewhere while the view is open.
                    None => self.rebuild(cart),
                }
            }
        }
        self.total = cart.total_price;
    }

    fn apply(&mut self, update: &CartUpdate) {
        self.phase = update.phase;
        self.submitting = update.phase == CheckoutPhase::Submitting;

        match &update.event {
            CartEvent::CheckoutOpened => {
                self.rebuild(&update.cart);
                self.message = None;
                self.last_error = None;
            }
            CartEvent::ItemChanged(change) => {
                if self.phase.is_open() && self.message.is_none() {
                    self.refresh_line(change, &update.cart);
                }
            }
            CartEvent::SubmissionStarted => {
                self.last_error = None;
            }
            CartEvent::SubmissionFailed => {}
            CartEvent::OrderPlaced(_) => {
                self.lines.clear();
                self.total = Money::zero();
                if self.phase == CheckoutPhase::Succeeded {
                    self.message = Some(SUCCESS_MESSAGE);
                }
            }
            CartEvent::CheckoutClosed => {
                *self = CheckoutViewState::default();
            }
        }
    }
}

pub struct CheckoutView {
    store: Arc<CartStore>,
    state: Arc<Mutex<CheckoutViewState>>,
    adjusts: EventChannel<CartAdjust>,
    _updates: Subscription,
}

impl CheckoutView {
    pub fn new(store: Arc<CartStore>) -> Self {
        let state = Arc::new(Mutex::new(CheckoutViewState::default()));
        let updates = {
            let state = state.clone();
            store.updates().subscribe(move |update: &CartUpdate| {
                lock(&state).apply(update);
            })
        };

        CheckoutView {
            store,
            state,
            adjusts: EventChannel::new(EventName::CartAdjust),
            _updates: updates,
        }
    }

    pub fn adjusts(&self) -> &EventChannel<CartAdjust> {
        &self.adjusts
    }

    pub fn state(&self) -> CheckoutViewState {
        lock(&self.state).clone()
    }

    pub fn is_open(&self) -> bool {
        lock(&self.state).phase.is_open()
    }

    /// The "+" button of a line.
    pub fn increment(&self, product_id: &str) -> bool {
        self.press_counter(product_id, 1)
    }

    /// The "−" button of a line.
    pub fn decrement(&self, product_id: &str) -> bool {
        self.press_counter(product_id, -1)
    }

    fn press_counter(&self, product_id: &str, delta: i64) -> bool {
        if lock(&self.state).line(product_id).is_none() {
            debug!(product_id, "checkout view: counter for a line not shown");
            return false;
        }
        self.adjusts.emit(&CartAdjust {
            product_id: product_id.to_string(),
            delta,
        });
        true
    }

    /// Escape key or the close button.
    pub fn close(&self) -> bool {
        self.store.close_checkout()
    }

    /// Submits the delivery form.
    pub async fn submit(&self, form: OrderForm) -> CheckoutResult<OrderReceipt> {
        let result = self.store.submit_order(form).await;
        if let Err(err) = &result {
            lock(&self.state).last_error = Some(err.to_string());
        }
        result
    }
}

impl std::fmt::Debug for CheckoutView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutView")
            .field("state", &*lock(&self.state))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storefront_checkout::{CheckoutError, OrderEndpoint, OrderRequest};
    use storefront_core::Product;

    struct FixedEndpoint(Option<u16>);

    #[async_trait]
    impl OrderEndpoint for FixedEndpoint {
        async fn submit(&self, _order: &OrderRequest) -> CheckoutResult<()> {
            match self.0 {
                None => Ok(()),
                Some(status) => Err(CheckoutError::Rejected { status }),
            }
        }
    }

    fn product(id: &str, cents: i64) -> Arc<Product> {
        Arc::new(Product::new(id, id, Money::from_cents(cents), format!("{id}.png")))
    }

    fn form() -> OrderForm {
        OrderForm::new("Santa Claus", "john@gmail.com", "+1234567", "North, Lapland, Snow Home")
    }

    fn open_view(reject: Option<u16>) -> (Arc<CartStore>, CheckoutView) {
        let store = Arc::new(CartStore::new(Arc::new(FixedEndpoint(reject))));
        let view = CheckoutView::new(store.clone());
        store.add_product(Some(product("tom-yam", 700)));
        store.add_product(Some(product("tom-yam", 700)));
        store.add_product(Some(product("rice", 220)));
        store.open_checkout().unwrap();
        (store, view)
    }

    #[test]
    fn test_open_lists_lines() {
        let (_store, view) = open_view(None);
        let state = view.state();

        assert_eq!(state.title(), Some(ORDER_TITLE));
        assert_eq!(state.lines.len(), 2);
        assert_eq!(state.line("tom-yam").unwrap().count, 2);
        assert_eq!(state.line("tom-yam").unwrap().price, Money::from_cents(1400));
        assert_eq!(state.total, Money::from_cents(1620));
    }

    #[test]
    fn test_line_refreshes_on_adjust() {
        let (store, view) = open_view(None);

        store.adjust_count("tom-yam", 1);
        assert_eq!(view.state().line("tom-yam").unwrap().count, 3);
        assert_eq!(view.state().total, Money::from_cents(2320));

        store.adjust_count("rice", -1);
        assert!(view.state().line("rice").is_none());
        assert_eq!(view.state().total, Money::from_cents(2100));
    }

    #[test]
    fn test_emptying_cart_closes_view() {
        let (store, view) = open_view(None);
        store.adjust_count("tom-yam", -2);
        store.adjust_count("rice", -1);

        assert!(!view.is_open());
        assert_eq!(view.state().title(), None);
    }

    #[test]
    fn test_counters_emit_adjust() {
        let (_store, view) = open_view(None);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            view.adjusts().subscribe(move |a: &CartAdjust| seen.lock().unwrap().push(a.clone()))
        };

        assert!(view.increment("rice"));
        assert!(view.decrement("tom-yam"));
        assert!(!view.increment("laab"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], CartAdjust { product_id: "tom-yam".into(), delta: -1 });
    }

    #[test]
    fn test_close() {
        let (_store, view) = open_view(None);
        assert!(view.close());
        assert!(!view.close());
        assert!(view.state().lines.is_empty());
    }

    #[tokio::test]
    async fn test_success_shows_message() {
        let (store, view) = open_view(None);

        let receipt = view.submit(form()).await.unwrap();
        assert_eq!(receipt.total, Money::from_cents(1620));

        let state = view.state();
        assert_eq!(state.title(), Some(SUCCESS_TITLE));
        assert_eq!(state.message, Some(SUCCESS_MESSAGE));
        assert!(state.lines.is_empty());
        assert!(!state.submitting);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_form_and_records_error() {
        let (store, view) = open_view(Some(500));

        assert!(view.submit(form()).await.is_err());

        let state = view.state();
        assert_eq!(state.phase, CheckoutPhase::Open);
        assert!(!state.submitting);
        assert_eq!(state.lines.len(), 2);
        assert!(state.last_error.is_some());
        assert_eq!(store.total_count(), 3);
    }
}
