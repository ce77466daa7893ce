//! Cart icon: item count and total, hidden while the cart is empty.
//! Activating it emits `cart-open`.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use storefront_checkout::{CartStore, CartUpdate};
use storefront_core::events::lock;
use storefront_core::{CartSnapshot, EventChannel, EventName, Money, Subscription};

/// What the icon shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartIconView {
    pub visible: bool,
    pub count: u64,
    pub total: Money,
}

impl CartIconView {
    fn from_cart(cart: &CartSnapshot) -> Self {
        CartIconView {
            visible: !cart.is_empty(),
            count: cart.total_count,
            total: cart.total_price,
        }
    }
}

impl fmt::Display for CartIconView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible {
            write!(f, "[cart {} | {}]", self.count, self.total)
        } else {
            f.write_str("[cart hidden]")
        }
    }
}

#[derive(Debug)]
pub struct CartIcon {
    view: Arc<Mutex<CartIconView>>,
    opens: EventChannel<()>,
    _updates: Subscription,
}

impl CartIcon {
    /// Builds the icon and starts following `store`.
    pub fn new(store: &CartStore) -> Self {
        let view = Arc::new(Mutex::new(CartIconView::from_cart(&store.snapshot())));
        let updates = {
            let view = view.clone();
            store.updates().subscribe(move |update: &CartUpdate| {
                *lock(&view) = CartIconView::from_cart(&update.cart);
            })
        };

        CartIcon {
            view,
            opens: EventChannel::new(EventName::CartOpen),
            _updates: updates,
        }
    }

    pub fn opens(&self) -> &EventChannel<()> {
        &self.opens
    }

    pub fn view(&self) -> CartIconView {
        *lock(&self.view)
    }

    /// Click on the icon. Does nothing while hidden.
    pub fn activate(&self) -> bool {
        if !self.view().visible {
            return false;
        }
        self.opens.emit(&());
        true
    }
}
