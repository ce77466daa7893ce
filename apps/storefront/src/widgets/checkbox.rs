//! Filter checkboxes ("No nuts", "Vegetarian only").

use std::sync::atomic::{AtomicBool, Ordering};

use storefront_core::{EventChannel, EventName};

/// A boolean filter toggle. Emits its state on every change.
#[derive(Debug)]
pub struct FilterCheckbox {
    checked: AtomicBool,
    changes: EventChannel<bool>,
}

impl FilterCheckbox {
    pub fn new(name: EventName) -> Self {
        FilterCheckbox {
            checked: AtomicBool::new(false),
            changes: EventChannel::new(name),
        }
    }

    pub fn nuts() -> Self {
        Self::new(EventName::NutsFilterChange)
    }

    pub fn vegetarian() -> Self {
        Self::new(EventName::VegetarianFilterChange)
    }

    pub fn changes(&self) -> &EventChannel<bool> {
        &self.changes
    }

    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::SeqCst)
    }

    /// Sets the state. Emits only if it changed.
    pub fn set(&self, checked: bool) -> bool {
        if self.checked.swap(checked, Ordering::SeqCst) == checked {
            return false;
        }
        self.changes.emit(&checked);
        true
    }
}
