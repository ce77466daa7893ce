//! Viewport-wide pointer events.
//!
//! A drag must keep tracking the pointer after it leaves the slider, so the
//! slider listens here, not on itself, and only while a drag is running.

use storefront_core::{EventChannel, EventName, Subscription};

/// A pointer event anywhere in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved; `fraction` is its x position relative to the slider track.
    Move { fraction: f64 },
    /// Pointer released.
    Up { fraction: f64 },
    /// Pointer capture lost without a release.
    Cancel,
}

/// Root of the pointer event stream.
#[derive(Debug, Clone)]
pub struct Viewport {
    pointer: EventChannel<PointerEvent>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Viewport {
            pointer: EventChannel::new(EventName::Pointer),
        }
    }

    /// Attaches a pointer listener until the subscription drops.
    pub fn listen<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        self.pointer.subscribe(handler)
    }

    /// Delivers a pointer event. Returns how many listeners saw it.
    pub fn dispatch(&self, event: PointerEvent) -> usize {
        self.pointer.emit(&event)
    }

    /// Number of attached pointer listeners.
    pub fn listener_count(&self) -> usize {
        self.pointer.subscriber_count()
    }
}
