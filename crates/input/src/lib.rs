//! Gesture input: turns scroll-wheel deltas and key presses into discrete
//! forward/backward navigation steps.

use glam::Vec2;
use winit::event::MouseScrollDelta;

/// Accumulated vertical scroll (in pixels) needed to trigger one step.
pub const DEFAULT_WHEEL_THRESHOLD: f32 = 60.0;

/// Pixels per line for line-based wheel deltas.
pub const LINE_HEIGHT_PIXELS: f32 = 40.0;

/// One directional navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Forward,
    Backward,
}

impl Gesture {
    /// +1 for forward, -1 for backward.
    pub fn direction(self) -> i32 {
        match self {
            Gesture::Forward => 1,
            Gesture::Backward => -1,
        }
    }
}

/// Scroll accumulator and key mapping.
#[derive(Debug, Clone)]
pub struct GestureInput {
    threshold: f32,
    /// Signed vertical scroll collected since the last trigger.
    accumulated: f32,
}

impl Default for GestureInput {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_THRESHOLD)
    }
}

impl GestureInput {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.abs(),
            accumulated: 0.0,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Forget any partially accumulated scroll.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Feed one wheel event. `delta` is browser-style: positive `y` scrolls forward.
    ///
    /// Horizontal-dominant events are ignored. Crossing the threshold in either
    /// direction resets the accumulator and yields a gesture.
    pub fn process_wheel(&mut self, delta: Vec2) -> Option<Gesture> {
        if delta.y.abs() < delta.x.abs() {
            return None;
        }
        self.accumulated += delta.y;
        if self.accumulated > self.threshold {
            self.accumulated = 0.0;
            Some(Gesture::Forward)
        } else if self.accumulated < -self.threshold {
            self.accumulated = 0.0;
            Some(Gesture::Backward)
        } else {
            None
        }
    }

    /// Map a key press. Down/PageDown step forward, Up/PageUp step back.
    pub fn process_key(&self, key: KeyCode) -> Option<Gesture> {
        match key {
            KeyCode::ArrowDown | KeyCode::PageDown => Some(Gesture::Forward),
            KeyCode::ArrowUp | KeyCode::PageUp => Some(Gesture::Backward),
            _ => None,
        }
    }
}

/// Convert a winit wheel delta into browser-style pixels (positive `y` = forward).
///
/// winit reports positive `y` when the wheel moves away from the user, which a
/// page treats as scrolling back up.
pub fn scroll_to_pixels(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(-x, -y) * LINE_HEIGHT_PIXELS,
        MouseScrollDelta::PixelDelta(pos) => Vec2::new(-pos.x as f32, -pos.y as f32),
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_triggers_only_after_threshold() {
        let mut input = GestureInput::default();
        assert_eq!(input.process_wheel(Vec2::new(0.0, 30.0)), None);
        assert_eq!(input.process_wheel(Vec2::new(0.0, 30.0)), None);
        assert_eq!(input.process_wheel(Vec2::new(0.0, 1.0)), Some(Gesture::Forward));
        assert_eq!(input.accumulated(), 0.0);
    }

    #[test]
    fn backward_scroll_yields_backward_gesture() {
        let mut input = GestureInput::new(60.0);
        assert_eq!(input.process_wheel(Vec2::new(0.0, -100.0)), Some(Gesture::Backward));
    }

    #[test]
    fn horizontal_dominant_scroll_is_ignored() {
        let mut input = GestureInput::default();
        assert_eq!(input.process_wheel(Vec2::new(200.0, 100.0)), None);
        assert_eq!(input.accumulated(), 0.0);
    }

    #[test]
    fn opposite_scrolls_cancel_out() {
        let mut input = GestureInput::default();
        input.process_wheel(Vec2::new(0.0, 50.0));
        input.process_wheel(Vec2::new(0.0, -50.0));
        assert_eq!(input.accumulated(), 0.0);
    }

    #[test]
    fn navigation_keys_map_to_gestures() {
        let input = GestureInput::default();
        assert_eq!(input.process_key(KeyCode::ArrowDown), Some(Gesture::Forward));
        assert_eq!(input.process_key(KeyCode::PageDown), Some(Gesture::Forward));
        assert_eq!(input.process_key(KeyCode::ArrowUp), Some(Gesture::Backward));
        assert_eq!(input.process_key(KeyCode::PageUp), Some(Gesture::Backward));
        assert_eq!(input.process_key(KeyCode::Space), None);
    }

    #[test]
    fn winit_line_delta_is_flipped_and_scaled() {
        let px = scroll_to_pixels(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(px, Vec2::new(0.0, 80.0));
        assert_eq!(Gesture::Forward.direction(), 1);
    }
}
