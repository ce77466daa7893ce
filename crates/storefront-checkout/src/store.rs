//! # Cart Store
//!
//! The authoritative cart, the checkout view's lifecycle and order
//! submission, behind one lock.
//!
//! ## Checkout Phases
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌────────┐  open   ┌──────┐  submit   ┌────────────┐  2xx  ┌─────────┐│
//! │   │ Closed │ ──────► │ Open │ ────────► │ Submitting │ ────► │Succeeded││
//! │   └────────┘ ◄────── └──────┘ ◄──────── └────────────┘       └─────────┘│
//! │       ▲       close     ▲      failure         │                  │     │
//! │       │                 │                      │ close            │     │
//! │       │   cart empties  │                      ▼                  │     │
//! │       ├─────────────────┘               (request continues,       │     │
//! │       │                                  cart cleared on 2xx)     │     │
//! │       └───────────────────────────────────────────────────────────┘     │
//! │                                 close                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Notification Ordering
//! Every mutation publishes a [`CartUpdate`] on [`CartStore::updates`] after
//! releasing the lock and BEFORE returning to the caller. Observers (cart
//! icon, checkout view) never render stale counts, and may read the store
//! from inside their handler.
//!
//! ## In-Flight Guard
//! At most one submission runs at a time. A second `submit_order` while one
//! is pending fails with `AlreadyInProgress`. The flag is released by an RAII
//! guard, so a dropped (cancelled) submission future also reopens the form.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use storefront_core::events::lock;
use storefront_core::{
    Cart, CartSnapshot, EventChannel, EventName, LineItemChange, Money, Product,
};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::endpoint::OrderEndpoint;
use crate::error::{CheckoutError, CheckoutResult};
use crate::order::{OrderForm, OrderReceipt, OrderRequest};

// =============================================================================
// Phase and Updates
// =============================================================================

/// Where the checkout view is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutPhase {
    #[default]
    Closed,
    Open,
    Submitting,
    Succeeded,
}

impl CheckoutPhase {
    /// True while the checkout view is on screen.
    pub fn is_open(&self) -> bool {
        !matches!(self, CheckoutPhase::Closed)
    }
}

/// What caused a [`CartUpdate`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    ItemChanged(LineItemChange),
    CheckoutOpened,
    CheckoutClosed,
    SubmissionStarted,
    SubmissionFailed,
    OrderPlaced(OrderReceipt),
}

/// Published after every store mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub event: CartEvent,
    /// Cart contents right after the mutation.
    pub cart: CartSnapshot,
    pub phase: CheckoutPhase,
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreState {
    cart: Cart,
    phase: CheckoutPhase,
    submitting: bool,
}

impl StoreState {
    fn update(&self, event: CartEvent) -> CartUpdate {
        CartUpdate {
            event,
            cart: self.cart.snapshot(),
            phase: self.phase,
        }
    }
}

/// Observable cart with checkout.
///
/// ## Thread Safety
/// State sits behind a `Mutex` that is never held across an `.await` or
/// while observers run.
pub struct CartStore {
    state: Mutex<StoreState>,
    updates: EventChannel<CartUpdate>,
    endpoint: Arc<dyn OrderEndpoint>,
}

impl CartStore {
    /// Creates an empty store that submits orders to `endpoint`.
    pub fn new(endpoint: Arc<dyn OrderEndpoint>) -> Self {
        CartStore {
            state: Mutex::new(StoreState::default()),
            updates: EventChannel::new(EventName::CartUpdate),
            endpoint,
        }
    }

    /// Channel carrying a [`CartUpdate`] per mutation.
    pub fn updates(&self) -> &EventChannel<CartUpdate> {
        &self.updates
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = lock(&self.state);
        f(&mut state)
    }

    fn publish(&self, updates: Vec<CartUpdate>) {
        for update in &updates {
            self.updates.emit(update);
        }
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Adds one unit of `product`. `None` is a no-op.
    pub fn add_product(&self, product: Option<Arc<Product>>) -> Option<LineItemChange> {
        let (change, update) = self.with_state(|s| {
            let change = s.cart.add_product(product)?;
            let update = s.update(CartEvent::ItemChanged(change.clone()));
            Some((change, update))
        })?;

        debug!(product_id = %change.product_id, count = change.count, "cart: product added");
        self.publish(vec![update]);
        Some(change)
    }

    /// Adds `delta` to a line item's count; unknown ids are a no-op.
    ///
    /// Removing the last line item closes an open checkout view.
    pub fn adjust_count(&self, product_id: &str, delta: i64) -> Option<LineItemChange> {
        let outcome = self.with_state(|s| {
            let change = s.cart.adjust_count(product_id, delta)?;
            let mut updates = vec![s.update(CartEvent::ItemChanged(change.clone()))];
            if s.cart.is_empty() && s.phase.is_open() {
                s.phase = CheckoutPhase::Closed;
                updates.push(s.update(CartEvent::CheckoutClosed));
            }
            Some((change, updates))
        });

        let Some((change, updates)) = outcome else {
            debug!(product_id, delta, "cart: adjust for product not in cart ignored");
            return None;
        };

        debug!(product_id, delta, count = change.count, "cart: count adjusted");
        self.publish(updates);
        Some(change)
    }

    // -------------------------------------------------------------------------
    // Derived queries
    // -------------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.with_state(|s| s.cart.is_empty())
    }

    pub fn total_count(&self) -> u64 {
        self.with_state(|s| s.cart.total_count())
    }

    pub fn total_price(&self) -> Money {
        self.with_state(|s| s.cart.total_price())
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.with_state(|s| s.cart.snapshot())
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.with_state(|s| s.phase)
    }

    pub fn is_submitting(&self) -> bool {
        self.with_state(|s| s.submitting)
    }

    // -------------------------------------------------------------------------
    // Checkout view
    // -------------------------------------------------------------------------

    /// Opens the checkout view.
    ///
    /// ## Errors
    /// - `CheckoutAlreadyOpen` when the view is already on screen
    /// - `EmptyCart` when there is nothing to check out
    pub fn open_checkout(&self) -> CheckoutResult<()> {
        let update = self.with_state(|s| -> CheckoutResult<CartUpdate> {
            if s.phase.is_open() {
                return Err(CheckoutError::CheckoutAlreadyOpen);
            }
            if s.cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            s.phase = CheckoutPhase::Open;
            Ok(s.update(CartEvent::CheckoutOpened))
        })?;

        debug!(total_count = update.cart.total_count, "checkout: opened");
        self.publish(vec![update]);
        Ok(())
    }

    /// Closes the checkout view. Returns false if it was not open.
    ///
    /// A pending submission keeps running.
    pub fn close_checkout(&self) -> bool {
        let update = self.with_state(|s| {
            if !s.phase.is_open() {
                return None;
            }
            s.phase = CheckoutPhase::Closed;
            Some(s.update(CartEvent::CheckoutClosed))
        });

        match update {
            Some(update) => {
                debug!(submitting = self.is_submitting(), "checkout: closed");
                self.publish(vec![update]);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Submits the order form for the current cart.
    ///
    /// ## Flow
    /// ```text
    /// preconditions ──► snapshot total, phase Submitting ──► endpoint.submit
    ///                                                            │
    ///                  ┌─────────────────────────────────────────┴──────┐
    ///                  ▼ Ok                                             ▼ Err
    ///        clear cart, phase Succeeded                      phase Open, cart kept
    ///        Ok(OrderReceipt)                                 Err(CheckoutError)
    /// ```
    ///
    /// ## Errors
    /// - `AlreadyInProgress`, `CheckoutClosed`, `EmptyCart`, `InvalidForm`
    ///   before any request is sent
    /// - `Rejected` / `Transport` from the endpoint
    pub async fn submit_order(&self, form: OrderForm) -> CheckoutResult<OrderReceipt> {
        let (request, started) = self.with_state(|s| -> CheckoutResult<(OrderRequest, CartUpdate)> {
            if s.submitting {
                return Err(CheckoutError::AlreadyInProgress);
            }
            if s.phase != CheckoutPhase::Open {
                return Err(CheckoutError::CheckoutClosed);
            }
            if s.cart.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            form.validate()?;

            s.submitting = true;
            s.phase = CheckoutPhase::Submitting;
            let request = OrderRequest::new(form, s.cart.total_price(), s.cart.total_count());
            Ok((request, s.update(CartEvent::SubmissionStarted)))
        })?;

        let _in_flight = InFlight { store: self };
        info!(
            order_id = %request.order_id,
            total = %request.total,
            item_count = request.item_count,
            "checkout: order submitted"
        );
        self.publish(vec![started]);

        match self.endpoint.submit(&request).await {
            Ok(()) => {
                let receipt = OrderReceipt::for_request(&request);
                let update = self.with_state(|s| {
                    if s.cart.total_price() != request.total {
                        warn!(
                            order_id = %request.order_id,
                            submitted = %request.total,
                            current = %s.cart.total_price(),
                            "checkout: cart changed while the order was in flight"
                        );
                    }
                    s.cart.clear();
                    s.submitting = false;
                    s.phase = match s.phase {
                        CheckoutPhase::Submitting => CheckoutPhase::Succeeded,
                        CheckoutPhase::Open => CheckoutPhase::Closed,
                        other => other,
                    };
                    s.update(CartEvent::OrderPlaced(receipt.clone()))
                });

                info!(order_id = %receipt.order_id, total = %receipt.total, "checkout: order placed");
                self.publish(vec![update]);
                Ok(receipt)
            }
            Err(err) => {
                let update = self.with_state(|s| {
                    s.submitting = false;
                    if s.phase == CheckoutPhase::Submitting {
                        s.phase = CheckoutPhase::Open;
                    }
                    s.update(CartEvent::SubmissionFailed)
                });

                warn!(
                    order_id = %request.order_id,
                    error = %err,
                    retryable = err.is_retryable(),
                    "checkout: order submission failed"
                );
                self.publish(vec![update]);
                Err(err)
            }
        }
    }
}

/// Clears the in-flight flag if a submission ends without reaching either
/// outcome branch (its future was dropped).
struct InFlight<'a> {
    store: &'a CartStore,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let update = self.store.with_state(|s| {
            if !s.submitting {
                return None;
            }
            s.submitting = false;
            if s.phase == CheckoutPhase::Submitting {
                s.phase = CheckoutPhase::Open;
            }
            Some(s.update(CartEvent::SubmissionFailed))
        });

        if let Some(update) = update {
            warn!("checkout: order submission abandoned");
            self.store.publish(vec![update]);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
