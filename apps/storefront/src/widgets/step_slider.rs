//! # Step Slider
//!
//! The spiciness slider: a [`SliderGesture`] plus the drag listener it holds
//! on the [`Viewport`] while a drag runs.
//!
//! ## Drag Listener Lifetime
//! ```text
//! pointer_down ──► gesture.start ──► viewport.listen(..) ──► DragGuard stored
//!                                           │
//!          ┌────────────────────────────────┼──────────────────────────┐
//!          ▼ Move                           ▼ Up                       ▼ Cancel
//!   preview only                  gesture.end, guard dropped     gesture.cancel,
//!   (no slider-change)            slider-change if changed       guard dropped
//!
//! Dropping the slider mid-drag drops the guard too.
//! ```
//! Whatever ends the drag, the viewport listener count returns to where it was.

use std::sync::{Arc, Mutex, Weak};

use storefront_core::events::lock;
use storefront_core::{
    CoreResult, EventChannel, EventName, SliderConfig, SliderGesture, SliderSnapshot, StepDirection,
    Subscription,
};
use tracing::debug;

use super::viewport::{PointerEvent, Viewport};

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderTarget {
    /// The track, the steps or the progress bar.
    Track,
    /// The draggable thumb; clicks here belong to the drag path.
    Thumb,
}

/// Viewport listener held for exactly one drag.
struct DragGuard {
    _pointer: Subscription,
}

struct SliderShared {
    gesture: Mutex<SliderGesture>,
    changes: EventChannel<u32>,
    drag: Mutex<Option<DragGuard>>,
}

impl SliderShared {
    fn commit(&self, changed: Option<u32>) -> Option<u32> {
        if let Some(value) = changed {
            debug!(value, "slider: value committed");
            self.changes.emit(&value);
        }
        changed
    }

    fn release_drag(&self) {
        let guard = lock(&self.drag).take();
        drop(guard);
    }

    fn on_pointer(&self, event: &PointerEvent) {
        match *event {
            PointerEvent::Move { fraction } => {
                lock(&self.gesture).on_gesture_move(fraction);
            }
            PointerEvent::Up { fraction } => {
                let changed = lock(&self.gesture).on_gesture_end(fraction);
                self.release_drag();
                self.commit(changed);
            }
            PointerEvent::Cancel => {
                if lock(&self.gesture).on_gesture_cancel() {
                    debug!("slider: drag cancelled");
                }
                self.release_drag();
            }
        }
    }
}

/// Spiciness slider widget. Emits `slider-change` with the committed value.
pub struct StepSlider {
    shared: Arc<SliderShared>,
}

impl StepSlider {
    /// ## Errors
    /// `InvalidArgument` when `steps < 2` or `value` is negative.
    pub fn new(config: SliderConfig) -> CoreResult<Self> {
        let gesture = SliderGesture::new(config)?;
        Ok(StepSlider {
            shared: Arc::new(SliderShared {
                gesture: Mutex::new(gesture),
                changes: EventChannel::new(EventName::SliderChange),
                drag: Mutex::new(None),
            }),
        })
    }

    pub fn changes(&self) -> &EventChannel<u32> {
        &self.shared.changes
    }

    /// Committed value.
    pub fn value(&self) -> u32 {
        lock(&self.shared.gesture).committed_value()
    }

    pub fn is_dragging(&self) -> bool {
        lock(&self.shared.gesture).is_dragging()
    }

    pub fn snapshot(&self) -> SliderSnapshot {
        lock(&self.shared.gesture).snapshot()
    }

    /// Click at `fraction` of the track width.
    pub fn click(&self, target: SliderTarget, fraction: f64) -> Option<u32> {
        if target == SliderTarget::Thumb {
            return None;
        }
        let changed = lock(&self.shared.gesture).on_track_activate(fraction);
        self.shared.commit(changed)
    }

    /// ArrowLeft / ArrowRight / Home / End.
    pub fn key(&self, direction: StepDirection) -> Option<u32> {
        let changed = lock(&self.shared.gesture).on_discrete_step(direction);
        self.shared.commit(changed)
    }

    /// Starts a drag and listens on `viewport` until it ends.
    pub fn pointer_down(&self, viewport: &Viewport) {
        lock(&self.shared.gesture).on_gesture_start();

        let weak: Weak<SliderShared> = Arc::downgrade(&self.shared);
        let pointer = viewport.listen(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.on_pointer(event);
            }
        });

        // A leftover guard from an unfinished drag is dropped here.
        let previous = lock(&self.shared.drag).replace(DragGuard { _pointer: pointer });
        drop(previous);
    }
}

impl std::fmt::Debug for StepSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSlider")
            .field("gesture", &*lock(&self.shared.gesture))
            .field("tracking", &lock(&self.shared.drag).is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(steps: u32, value: i64) -> StepSlider {
        StepSlider::new(SliderConfig { steps, value }).unwrap()
    }

    fn recorder(slider: &StepSlider) -> (Arc<Mutex<Vec<u32>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sub = {
            let seen = seen.clone();
            slider.changes().subscribe(move |v| seen.lock().unwrap().push(*v))
        };
        (seen, sub)
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(StepSlider::new(SliderConfig { steps: 1, value: 0 }).is_err());
        assert!(StepSlider::new(SliderConfig { steps: 5, value: -1 }).is_err());
    }

    #[test]
    fn test_click_notifies_once_per_change() {
        let slider = slider(5, 0);
        let (seen, _sub) = recorder(&slider);

        assert_eq!(slider.click(SliderTarget::Track, 0.5), Some(2));
        assert_eq!(slider.click(SliderTarget::Track, 0.5), None);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_click_on_thumb_is_ignored() {
        let slider = slider(5, 0);
        assert_eq!(slider.click(SliderTarget::Thumb, 1.0), None);
        assert_eq!(slider.value(), 0);
    }

    #[test]
    fn test_keys() {
        let slider = slider(5, 3);
        let (seen, _sub) = recorder(&slider);

        slider.key(StepDirection::Next);
        slider.key(StepDirection::Next);
        slider.key(StepDirection::First);
        slider.key(StepDirection::Previous);

        assert_eq!(*seen.lock().unwrap(), vec![4, 0]);
    }

    #[test]
    fn test_drag_notifies_once_and_releases_listener() {
        let viewport = Viewport::new();
        let slider = slider(5, 0);
        let (seen, _sub) = recorder(&slider);

        slider.pointer_down(&viewport);
        assert_eq!(viewport.listener_count(), 1);

        for fraction in [0.1, 0.3, 0.6, 0.9, 2.0] {
            viewport.dispatch(PointerEvent::Move { fraction });
        }
        assert!(slider.is_dragging());
        assert_eq!(slider.snapshot().display_value, 4);
        assert!(seen.lock().unwrap().is_empty());

        viewport.dispatch(PointerEvent::Up { fraction: 0.76 });

        assert_eq!(*seen.lock().unwrap(), vec![3]);
        assert_eq!(slider.value(), 3);
        assert!(!slider.is_dragging());
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_drag_back_to_start_is_silent() {
        let viewport = Viewport::new();
        let slider = slider(5, 2);
        let (seen, _sub) = recorder(&slider);

        slider.pointer_down(&viewport);
        viewport.dispatch(PointerEvent::Move { fraction: 1.0 });
        viewport.dispatch(PointerEvent::Up { fraction: 0.5 });

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_cancel_discards_preview_and_releases_listener() {
        let viewport = Viewport::new();
        let slider = slider(5, 1);
        let (seen, _sub) = recorder(&slider);

        slider.pointer_down(&viewport);
        viewport.dispatch(PointerEvent::Move { fraction: 1.0 });
        viewport.dispatch(PointerEvent::Cancel);

        assert_eq!(slider.value(), 1);
        assert!(!slider.is_dragging());
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(viewport.listener_count(), 0);

        // Pointer events after the drag reach nobody.
        assert_eq!(viewport.dispatch(PointerEvent::Up { fraction: 1.0 }), 0);
    }

    #[test]
    fn test_dropping_slider_mid_drag_releases_listener() {
        let viewport = Viewport::new();
        let slider = slider(5, 1);

        slider.pointer_down(&viewport);
        assert_eq!(viewport.listener_count(), 1);

        drop(slider);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_second_pointer_down_keeps_one_listener() {
        let viewport = Viewport::new();
        let slider = slider(5, 1);

        slider.pointer_down(&viewport);
        slider.pointer_down(&viewport);
        assert_eq!(viewport.listener_count(), 1);

        viewport.dispatch(PointerEvent::Up { fraction: 0.0 });
        assert_eq!(slider.value(), 0);
        assert_eq!(viewport.listener_count(), 0);
    }
}
