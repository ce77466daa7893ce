//! # Event Channels
//!
//! Typed, synchronous publish/subscribe channels used between widgets.
//!
//! ## Why Channels?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductCard ──emit(id)──► EventChannel<String> ──► EventCoordinator    │
//! │  StepSlider  ──emit(v)───► EventChannel<u32>    ──►   (subscriber)      │
//! │  RibbonMenu  ──emit(id)──► EventChannel<String> ──►      │              │
//! │                                                          ▼              │
//! │                                              CartStore / ProductsGrid   │
//! │                                                                         │
//! │  Widgets never see each other. A channel knows its subscribers only     │
//! │  as opaque handlers.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Delivery Guarantees
//! - `emit` runs every handler before it returns, in subscription order
//! - Handlers are snapshotted first, so a handler may subscribe or drop a
//!   [`Subscription`] on the same channel without deadlocking
//! - Dropping a [`Subscription`] detaches its handler; the channel never
//!   keeps a subscriber alive on its own

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Every critical section in the storefront leaves its state valid, so a
/// poisoned lock carries no torn data.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Event Names
// =============================================================================

/// The named events flowing between storefront widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Payload: product id. Raised by product cards and carousel slides.
    ProductAdd,
    /// Payload: committed slider value.
    SliderChange,
    /// Payload: category id, empty for "All".
    RibbonSelect,
    /// Payload: checkbox state.
    NutsFilterChange,
    /// Payload: checkbox state.
    VegetarianFilterChange,
    /// Raised by the cart icon.
    CartOpen,
    /// Payload: product id and count delta, from checkout view counters.
    CartAdjust,
    /// Payload: cart update, raised by the cart store.
    CartUpdate,
    /// Payload: viewport-wide pointer event.
    Pointer,
}

impl EventName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventName::ProductAdd => "product-add",
            EventName::SliderChange => "slider-change",
            EventName::RibbonSelect => "ribbon-select",
            EventName::NutsFilterChange => "nuts-filter-change",
            EventName::VegetarianFilterChange => "vegetarian-filter-change",
            EventName::CartOpen => "cart-open",
            EventName::CartAdjust => "cart-adjust",
            EventName::CartUpdate => "cart-update",
            EventName::Pointer => "pointer",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Channel
// =============================================================================

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(u64, Handler<E>)>>,
}

/// A named, typed event channel.
///
/// Cloning gives another handle to the same channel, so every card of a grid
/// can emit on the grid's `product-add` channel.
pub struct EventChannel<E> {
    name: EventName,
    registry: Arc<Registry<E>>,
}

impl<E> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        EventChannel {
            name: self.name,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: 'static> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> EventChannel<E> {
    pub fn new(name: EventName) -> Self {
        EventChannel {
            name,
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(0),
                handlers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> EventName {
        self.name
    }

    /// Attaches `handler` until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the Subscription detaches the handler immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.registry.handlers).push((id, Arc::new(handler)));

        let registry: Weak<Registry<E>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry.handlers).retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    /// Delivers `event` to every current subscriber. Returns how many ran.
    pub fn emit(&self, event: &E) -> usize {
        let handlers: Vec<Handler<E>> = lock(&self.registry.handlers)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registry.handlers).len()
    }
}

// =============================================================================
// Subscription Guard
// =============================================================================

/// Keeps a handler attached. Dropping it detaches the handler.
///
/// ```text
/// let sub = channel.subscribe(...);   ── handler attached
///     ...
/// drop(sub);                          ── handler detached, on every path
/// ```
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + Send + Sync + 'static) -> Self {
        Subscription {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detaches now. Same as dropping, spelled out at call sites.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
