//! # Event Coordinator
//!
//! The one place where widget events turn into calls on other components.
//!
//! ## Routing Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  channel                   payload        action                        │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  product-add (carousel)    product id  ─► catalog lookup ─► cart add    │
//! │  product-add (grid cards)  product id  ─► catalog lookup ─► cart add    │
//! │  slider-change             u32         ─► grid: max_spiciness           │
//! │  ribbon-select             category id ─► grid: category ("" = all)     │
//! │  nuts-filter-change        bool        ─► grid: exclude_nuts            │
//! │  vegetarian-filter-change  bool        ─► grid: vegetarian_only         │
//! │  cart-open                 ()          ─► store: open_checkout          │
//! │  cart-adjust               id, delta   ─► store: adjust_count           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The coordinator owns every [`Subscription`]; dropping it unwires the
//! storefront. Widgets never reference each other.

use std::sync::Arc;

use storefront_checkout::{CartStore, CheckoutError};
use storefront_core::{FilterUpdate, Spiciness, Subscription};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::widgets::{
    CartAdjust, CartIcon, Carousel, CheckoutView, FilterCheckbox, ProductsGrid, RibbonMenu, StepSlider,
};

/// Components the coordinator calls into.
#[derive(Clone)]
pub struct Targets {
    pub catalog: Arc<Catalog>,
    pub store: Arc<CartStore>,
    pub grid: Arc<ProductsGrid>,
}

/// Widgets whose channels the coordinator listens on.
pub struct Sources<'a> {
    pub carousel: &'a Carousel,
    pub ribbon: &'a RibbonMenu,
    pub slider: &'a StepSlider,
    pub nuts: &'a FilterCheckbox,
    pub vegetarian: &'a FilterCheckbox,
    pub cart_icon: &'a CartIcon,
    pub checkout: &'a CheckoutView,
}

pub struct EventCoordinator {
    subscriptions: Vec<Subscription>,
}

impl EventCoordinator {
    /// Subscribes to every source channel, then runs the initial filter from
    /// the widgets' current values.
    pub fn wire(targets: &Targets, sources: Sources<'_>) -> Self {
        let mut subscriptions = Vec::with_capacity(8);

        for adds in [sources.carousel.adds(), targets.grid.adds()] {
            let catalog = targets.catalog.clone();
            let store = targets.store.clone();
            subscriptions.push(adds.subscribe(move |product_id: &String| {
                add_to_cart(&catalog, &store, product_id);
            }));
        }

        let grid = targets.grid.clone();
        subscriptions.push(sources.slider.changes().subscribe(move |value: &u32| {
            grid.update_filter(FilterUpdate::max_spiciness(*value));
        }));

        let grid = targets.grid.clone();
        subscriptions.push(sources.ribbon.selects().subscribe(move |category: &String| {
            grid.update_filter(FilterUpdate::category(category));
        }));

        let grid = targets.grid.clone();
        subscriptions.push(sources.nuts.changes().subscribe(move |checked: &bool| {
            grid.update_filter(FilterUpdate::exclude_nuts(*checked));
        }));

        let grid = targets.grid.clone();
        subscriptions.push(sources.vegetarian.changes().subscribe(move |checked: &bool| {
            grid.update_filter(FilterUpdate::vegetarian_only(*checked));
        }));

        let store = targets.store.clone();
        subscriptions.push(sources.cart_icon.opens().subscribe(move |_| {
            match store.open_checkout() {
                Ok(()) => {}
                Err(CheckoutError::CheckoutAlreadyOpen) => debug!("coordinator: checkout already open"),
                Err(err) => warn!(error = %err, "coordinator: checkout not opened"),
            }
        }));

        let store = targets.store.clone();
        subscriptions.push(sources.checkout.adjusts().subscribe(move |adjust: &CartAdjust| {
            store.adjust_count(&adjust.product_id, adjust.delta);
        }));

        let initial = initial_filter(&sources);
        let shown = targets.grid.update_filter(initial);
        debug!(subscriptions = subscriptions.len(), shown, "coordinator: storefront wired");

        EventCoordinator { subscriptions }
    }
}

impl std::fmt::Debug for EventCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCoordinator")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

fn add_to_cart(catalog: &Catalog, store: &CartStore, product_id: &str) {
    match catalog.product(product_id) {
        Some(product) => {
            store.add_product(Some(product));
        }
        None => warn!(product_id, "coordinator: product-add for unknown product ignored"),
    }
}

/// Every criterion at once, from the widgets' current state.
fn initial_filter(sources: &Sources<'_>) -> FilterUpdate {
    let category = sources.ribbon.value();
    FilterUpdate {
        exclude_nuts: Some(sources.nuts.is_checked()),
        vegetarian_only: Some(sources.vegetarian.is_checked()),
        max_spiciness: Some(Spiciness::new(sources.slider.value())),
        category: Some((!category.is_empty()).then_some(category)),
    }
}
