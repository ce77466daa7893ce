//! Category ribbon.
//!
//! Emits `ribbon-select` with the chosen category id. The id of the "All"
//! entry is the empty string, which the grid reads as "no category filter".

use std::sync::Mutex;

use serde::Serialize;
use storefront_core::events::lock;
use storefront_core::validation::validate_non_empty;
use storefront_core::{Category, CoreError, CoreResult, EventChannel, EventName};
use tracing::debug;

/// Which scroll arrows are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArrowVisibility {
    pub left: bool,
    pub right: bool,
}

/// Arrow visibility for a horizontally scrolled ribbon.
///
/// Both arrows hide when the content fits. Otherwise the left arrow shows
/// once scrolled past the start, the right one while at least one pixel
/// remains to the end.
pub fn arrow_visibility(scroll_left: f64, scroll_width: f64, client_width: f64) -> ArrowVisibility {
    let overflows = scroll_width > client_width;
    let remaining = scroll_width - scroll_left - client_width;
    ArrowVisibility {
        left: overflows && scroll_left > 0.0,
        right: overflows && remaining >= 1.0,
    }
}

#[derive(Debug)]
pub struct RibbonMenu {
    categories: Vec<Category>,
    active: Mutex<usize>,
    selects: EventChannel<String>,
}

impl RibbonMenu {
    /// ## Errors
    /// `InvalidArgument` for an empty list or a category without a name.
    pub fn new(categories: Vec<Category>) -> CoreResult<Self> {
        validate_non_empty("categories", &categories)?;
        for category in &categories {
            category.validate().map_err(CoreError::from)?;
        }
        Ok(RibbonMenu {
            categories,
            active: Mutex::new(0),
            selects: EventChannel::new(EventName::RibbonSelect),
        })
    }

    pub fn selects(&self) -> &EventChannel<String> {
        &self.selects
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Active category.
    pub fn active(&self) -> &Category {
        let index = *lock(&self.active);
        &self.categories[index]
    }

    /// Active category id; `""` for "All".
    pub fn value(&self) -> String {
        self.active().id.clone()
    }

    /// Makes `id` active and emits `ribbon-select`, also when it already was.
    /// Unknown ids are ignored and return false.
    pub fn select(&self, id: &str) -> bool {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            debug!(category = id, "ribbon: unknown category ignored");
            return false;
        };
        *lock(&self.active) = index;

        debug!(category = id, "ribbon: category selected");
        self.selects.emit(&id.to_string());
        true
    }
}
