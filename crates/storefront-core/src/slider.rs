//! # Slider Gesture
//!
//! Turns clicks, key presses and drags on a step track into a committed
//! integer value.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │             track_activate / discrete_step                              │
//! │            ┌──────────────────────┐                                     │
//! │            │  commit if changed   │                                     │
//! │            ▼                      │                                     │
//! │        ┌────────┐  gesture_start  ┌──────────────┐                      │
//! │        │  Idle  │ ──────────────► │   Dragging   │ ◄─┐ gesture_move     │
//! │        └────────┘                 │ preview only │ ──┘ (no commit)      │
//! │            ▲                      └──────┬───────┘                      │
//! │            │      gesture_end            │                              │
//! │            ├─────────────────────────────┤ commit if final ≠ committed  │
//! │            │      gesture_cancel         │                              │
//! │            └─────────────────────────────┘ discard preview              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every input method returns `Some(value)` exactly when a "changed"
//! notification is due. Intermediate moves never return one, so a whole
//! drag yields at most one.
//!
//! ## Position Mapping
//! A fraction `f` of the track width maps to `round(clamp(f, 0, 1) × (steps-1))`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::validation::{validate_slider_steps, validate_slider_value};

// =============================================================================
// Configuration
// =============================================================================

/// Slider construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SliderConfig {
    /// Number of positions on the track, at least 2.
    pub steps: u32,
    /// Initial value; clamped to `steps - 1`, must not be negative.
    #[serde(default)]
    #[ts(type = "number")]
    pub value: i64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        SliderConfig { steps: 5, value: 3 }
    }
}

impl SliderConfig {
    pub fn validate(&self) -> CoreResult<()> {
        validate_slider_steps(self.steps)?;
        validate_slider_value(self.value)?;
        Ok(())
    }
}

/// Keyboard-equivalent discrete moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    /// ArrowLeft
    Previous,
    /// ArrowRight
    Next,
    /// Home
    First,
    /// End
    Last,
}

// =============================================================================
// Gesture State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    preview: u32,
    /// Clamped pointer fraction, for the thumb position.
    fraction: f64,
}

/// The slider's value state machine. No rendering, no listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderGesture {
    steps: u32,
    committed: u32,
    drag: Option<DragState>,
}

impl SliderGesture {
    /// Builds a gesture machine after validating `config`.
    pub fn new(config: SliderConfig) -> CoreResult<Self> {
        config.validate()?;
        let max = i64::from(config.steps - 1);
        let committed = config.value.clamp(0, max) as u32;
        Ok(SliderGesture {
            steps: config.steps,
            committed,
            drag: None,
        })
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    fn max_value(&self) -> u32 {
        self.steps - 1
    }

    /// The value last announced through a "changed" notification.
    pub fn committed_value(&self) -> u32 {
        self.committed
    }

    /// The value shown to the user: the preview while dragging, otherwise
    /// the committed value.
    pub fn preview_value(&self) -> u32 {
        self.drag.map_or(self.committed, |d| d.preview)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Thumb and progress bar position in percent of the track.
    ///
    /// Follows the raw pointer while dragging, the committed step otherwise.
    pub fn position_percent(&self) -> f64 {
        match self.drag {
            Some(drag) => drag.fraction * 100.0,
            None => f64::from(self.committed) / f64::from(self.max_value()) * 100.0,
        }
    }

    fn value_at(&self, fraction: f64) -> u32 {
        let fraction = clamp_fraction(fraction);
        (fraction * f64::from(self.max_value())).round() as u32
    }

    fn commit(&mut self, candidate: u32) -> Option<u32> {
        let candidate = candidate.min(self.max_value());
        if candidate == self.committed {
            return None;
        }
        self.committed = candidate;
        Some(candidate)
    }

    // -------------------------------------------------------------------------
    // Discrete input
    // -------------------------------------------------------------------------

    /// A click on the track at `fraction` of its width.
    pub fn on_track_activate(&mut self, fraction: f64) -> Option<u32> {
        let candidate = self.value_at(fraction);
        self.commit(candidate)
    }

    pub fn on_discrete_step(&mut self, direction: StepDirection) -> Option<u32> {
        let candidate = match direction {
            StepDirection::Previous => self.committed.saturating_sub(1),
            StepDirection::Next => self.committed.saturating_add(1),
            StepDirection::First => 0,
            StepDirection::Last => self.max_value(),
        };
        self.commit(candidate)
    }

    // -------------------------------------------------------------------------
    // Drag gesture
    // -------------------------------------------------------------------------

    /// Enters `Dragging`. The preview starts at the committed value.
    ///
    /// A second start while already dragging restarts the preview.
    pub fn on_gesture_start(&mut self) {
        let fraction = f64::from(self.committed) / f64::from(self.max_value());
        self.drag = Some(DragState {
            preview: self.committed,
            fraction,
        });
    }

    /// Updates the preview. Returns the new preview value, or `None` when
    /// not dragging.
    pub fn on_gesture_move(&mut self, fraction: f64) -> Option<u32> {
        let preview = self.value_at(fraction);
        let drag = self.drag.as_mut()?;
        drag.preview = preview;
        drag.fraction = clamp_fraction(fraction);
        Some(preview)
    }

    /// Leaves `Dragging` and commits the release position if it changed the
    /// value. Ignored when not dragging.
    pub fn on_gesture_end(&mut self, fraction: f64) -> Option<u32> {
        self.drag.take()?;
        let candidate = self.value_at(fraction);
        self.commit(candidate)
    }

    /// Abandons a drag without committing. Returns whether a drag was active.
    pub fn on_gesture_cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Serializable render state.
    pub fn snapshot(&self) -> SliderSnapshot {
        SliderSnapshot {
            steps: self.steps,
            value: self.committed,
            display_value: self.preview_value(),
            position_percent: self.position_percent(),
            dragging: self.is_dragging(),
        }
    }
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// What a slider renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SliderSnapshot {
    pub steps: u32,
    /// Committed value.
    pub value: u32,
    /// Number shown in the thumb; the highlighted step.
    pub display_value: u32,
    pub position_percent: f64,
    pub dragging: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn slider(steps: u32, value: i64) -> SliderGesture {
        SliderGesture::new(SliderConfig { steps, value }).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(matches!(
            SliderGesture::new(SliderConfig { steps: 1, value: 0 }),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            SliderGesture::new(SliderConfig { steps: 5, value: -1 }),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_initial_value_clamped() {
        assert_eq!(slider(5, 10).committed_value(), 4);
        assert_eq!(slider(5, 3).committed_value(), 3);
    }

    #[test]
    fn test_track_activate_commits_once() {
        let mut s = slider(5, 0);
        assert_eq!(s.on_track_activate(0.5), Some(2));
        assert_eq!(s.on_track_activate(0.5), None);
        assert_eq!(s.committed_value(), 2);
    }

    #[test]
    fn test_track_activate_clamps() {
        let mut s = slider(5, 2);
        assert_eq!(s.on_track_activate(1.7), Some(4));
        assert_eq!(s.on_track_activate(-0.3), Some(0));
        assert_eq!(s.on_track_activate(f64::NAN), None);
    }

    #[test]
    fn test_discrete_steps() {
        let mut s = slider(5, 0);
        assert_eq!(s.on_discrete_step(StepDirection::Previous), None);
        assert_eq!(s.on_discrete_step(StepDirection::Next), Some(1));
        assert_eq!(s.on_discrete_step(StepDirection::Last), Some(4));
        assert_eq!(s.on_discrete_step(StepDirection::Next), None);
        assert_eq!(s.on_discrete_step(StepDirection::First), Some(0));
    }

    #[test]
    fn test_drag_moves_never_commit() {
        let mut s = slider(5, 1);
        s.on_gesture_start();
        assert!(s.is_dragging());

        assert_eq!(s.on_gesture_move(0.9), Some(4));
        assert_eq!(s.on_gesture_move(0.6), Some(2));
        assert_eq!(s.committed_value(), 1);
        assert_eq!(s.preview_value(), 2);

        assert_eq!(s.on_gesture_end(0.74), Some(3));
        assert!(!s.is_dragging());
        assert_eq!(s.committed_value(), 3);
    }

    #[test]
    fn test_drag_back_to_start_is_silent() {
        let mut s = slider(5, 2);
        s.on_gesture_start();
        s.on_gesture_move(0.0);
        s.on_gesture_move(1.0);
        assert_eq!(s.on_gesture_end(0.5), None);
        assert_eq!(s.committed_value(), 2);
    }

    #[test]
    fn test_gesture_cancel_discards_preview() {
        let mut s = slider(5, 2);
        s.on_gesture_start();
        s.on_gesture_move(1.0);
        assert!(s.on_gesture_cancel());
        assert_eq!(s.committed_value(), 2);
        assert_eq!(s.preview_value(), 2);
        assert!(!s.on_gesture_cancel());
    }

    #[test]
    fn test_move_and_end_ignored_when_idle() {
        let mut s = slider(5, 2);
        assert_eq!(s.on_gesture_move(1.0), None);
        assert_eq!(s.on_gesture_end(1.0), None);
        assert_eq!(s.committed_value(), 2);
    }

    #[test]
    fn test_position_percent() {
        let mut s = slider(5, 1);
        assert_eq!(s.position_percent(), 25.0);

        s.on_gesture_start();
        s.on_gesture_move(0.33);
        assert!((s.position_percent() - 33.0).abs() < 1e-9);

        let snapshot = s.snapshot();
        assert!(snapshot.dragging);
        assert_eq!(snapshot.value, 1);
        assert_eq!(snapshot.display_value, 1);
    }
}
