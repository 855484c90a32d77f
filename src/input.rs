//! Pointer state for the window layer.
//!
//! Winit reports discrete events; the app needs a small amount of continuous
//! state on top of them: where the cursor is, which buttons are held, and
//! the drag delta since the last cursor report while a pan is in progress.

/// Cursor and button bookkeeping between window events.
#[derive(Debug, Default)]
pub struct InputState {
    cursor: (f64, f64),
    left_held: bool,
    right_held: bool,
    last_pan_position: Option<(f64, f64)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in physical pixels.
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Record a cursor move. While the right button is held, returns the
    /// screen-space delta since the previous position for panning.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.cursor = (x, y);
        if self.right_held {
            let last = self.last_pan_position.replace((x, y));
            last.map(|(last_x, last_y)| (x - last_x, y - last_y))
        } else {
            None
        }
    }

    pub fn left_held(&self) -> bool {
        self.left_held
    }

    pub fn set_left_held(&mut self, held: bool) {
        self.left_held = held;
    }

    /// Right button starts and stops a pan drag; the anchor is the cursor
    /// position at press time.
    pub fn set_right_held(&mut self, held: bool) {
        self.right_held = held;
        self.last_pan_position = held.then_some(self.cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pan_delta_without_right_button() {
        let mut input = InputState::new();
        assert_eq!(input.cursor_moved(10.0, 20.0), None);
        assert_eq!(input.cursor(), (10.0, 20.0));
    }

    #[test]
    fn pan_deltas_accumulate_from_the_press_anchor() {
        let mut input = InputState::new();
        input.cursor_moved(100.0, 100.0);
        input.set_right_held(true);

        assert_eq!(input.cursor_moved(110.0, 95.0), Some((10.0, -5.0)));
        assert_eq!(input.cursor_moved(115.0, 95.0), Some((5.0, 0.0)));

        input.set_right_held(false);
        assert_eq!(input.cursor_moved(200.0, 200.0), None);
    }
}
