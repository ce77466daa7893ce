//! Promotional carousel. Every slide has an "add" button that emits
//! `product-add` with the slide id.

use std::sync::Mutex;

use serde::Serialize;
use storefront_core::events::lock;
use storefront_core::validation::validate_non_empty;
use storefront_core::{CoreError, CoreResult, EventChannel, EventName, Slide};
use tracing::debug;

/// Which carousel arrows are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselArrows {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug)]
pub struct Carousel {
    slides: Vec<Slide>,
    current: Mutex<usize>,
    adds: EventChannel<String>,
}

impl Carousel {
    /// ## Errors
    /// `InvalidArgument` for an empty list or an incomplete slide.
    pub fn new(slides: Vec<Slide>) -> CoreResult<Self> {
        validate_non_empty("slides", &slides)?;
        for slide in &slides {
            slide.validate().map_err(CoreError::from)?;
        }
        Ok(Carousel {
            slides,
            current: Mutex::new(0),
            adds: EventChannel::new(EventName::ProductAdd),
        })
    }

    /// The carousel's own `product-add` channel.
    pub fn adds(&self) -> &EventChannel<String> {
        &self.adds
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn index(&self) -> usize {
        *lock(&self.current)
    }

    pub fn current(&self) -> &Slide {
        &self.slides[self.index()]
    }

    /// Moves right. Returns false on the last slide.
    pub fn next(&self) -> bool {
        let mut current = lock(&self.current);
        if *current + 1 >= self.slides.len() {
            return false;
        }
        *current += 1;
        true
    }

    /// Moves left. Returns false on the first slide.
    pub fn prev(&self) -> bool {
        let mut current = lock(&self.current);
        if *current == 0 {
            return false;
        }
        *current -= 1;
        true
    }

    pub fn arrows(&self) -> CarouselArrows {
        let index = self.index();
        CarouselArrows {
            left: index > 0,
            right: index + 1 < self.slides.len(),
        }
    }

    /// "Add" on the slide currently shown.
    pub fn add_current(&self) {
        let id = self.current().id.clone();
        self.emit_add(id);
    }

    /// "Add" on a specific slide. Unknown ids are ignored.
    pub fn add(&self, slide_id: &str) -> bool {
        if !self.slides.iter().any(|s| s.id == slide_id) {
            debug!(slide_id, "carousel: unknown slide ignored");
            return false;
        }
        self.emit_add(slide_id.to_string());
        true
    }

    fn emit_add(&self, id: String) {
        debug!(product_id = %id, "carousel: add clicked");
        self.adds.emit(&id);
    }
}
