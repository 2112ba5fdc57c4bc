// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tells clicks and grab-and-drag gestures apart on the map surface.
//! A press that travels less than the threshold before release is a click;
//! anything further pans the map.

use iced::{Point, Vector};

/// Manages press/drag state of the pointer
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Whether the press has turned into a drag
    pub is_dragging: bool,

    /// Position where the press started
    pub start_position: Option<Point>,

    /// Last position reported while pressed
    pub last_position: Option<Point>,
}

impl DragState {
    /// Records a button press
    pub fn start(&mut self, position: Point) {
        self.is_dragging = false;
        self.start_position = Some(position);
        self.last_position = Some(position);
    }

    /// Whether a button is currently held down
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.start_position.is_some()
    }

    /// Tracks cursor movement while pressed.
    ///
    /// Returns the delta to pan by once the press has become a drag.
    pub fn track(&mut self, position: Point, threshold: f32) -> Option<Vector> {
        let start = self.start_position?;
        let last = self.last_position.unwrap_or(start);

        if !self.is_dragging {
            if start.distance(position) < threshold {
                return None;
            }
            self.is_dragging = true;
        }

        self.last_position = Some(position);
        let delta = position - last;
        (delta != Vector::ZERO).then_some(delta)
    }

    /// Ends the press. Returns the press position when it was a click.
    pub fn release(&mut self) -> Option<Point> {
        let click = (!self.is_dragging).then_some(self.start_position).flatten();
        self.stop();
        click
    }

    /// Drops any press in progress
    pub fn stop(&mut self) {
        self.is_dragging = false;
        self.start_position = None;
        self.last_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 4.0;

    #[test]
    fn default_drag_state_is_idle() {
        let state = DragState::default();
        assert!(!state.is_dragging);
        assert!(!state.is_pressed());
    }

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));
        assert_eq!(state.release(), Some(Point::new(100.0, 50.0)));
        assert!(!state.is_pressed());
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));

        assert_eq!(state.track(Point::new(102.0, 51.0), THRESHOLD), None);
        assert!(!state.is_dragging);
        assert_eq!(state.release(), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn moving_past_threshold_becomes_drag() {
        let mut state = DragState::default();
        state.start(Point::new(200.0, 150.0));

        let delta = state.track(Point::new(180.0, 130.0), THRESHOLD);
        assert_eq!(delta, Some(Vector::new(-20.0, -20.0)));
        assert!(state.is_dragging);

        // Deltas are relative to the previous position once dragging
        let delta = state.track(Point::new(185.0, 130.0), THRESHOLD);
        assert_eq!(delta, Some(Vector::new(5.0, 0.0)));

        assert_eq!(state.release(), None);
        assert!(!state.is_dragging);
    }

    #[test]
    fn tracking_without_press_does_nothing() {
        let mut state = DragState::default();
        assert_eq!(state.track(Point::new(10.0, 10.0), THRESHOLD), None);
        assert_eq!(state.release(), None);
    }

    #[test]
    fn stop_clears_state() {
        let mut state = DragState::default();
        state.start(Point::new(100.0, 50.0));
        let _ = state.track(Point::new(150.0, 50.0), THRESHOLD);
        state.stop();

        assert!(!state.is_dragging);
        assert!(state.start_position.is_none());
        assert!(state.last_position.is_none());
    }
}
