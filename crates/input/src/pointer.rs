use aviator_common::normalize;
use glam::Vec2;

/// Convert a client-area cursor position (pixels, origin top-left, y down)
/// into device units: x in `[-1, 1]` left to right, y in `[-1, 1]` bottom to
/// top. Positions outside the client area are clamped.
pub fn pointer_from_client(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        normalize(x as f32, 0.0, width as f32, -1.0, 1.0),
        normalize(y as f32, 0.0, height as f32, 1.0, -1.0),
    )
}

/// Latest pointer state, written by input events and read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewState {
    pointer: Vec2,
}

impl ViewState {
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Store a pointer position, clamped to `[-1, 1]`.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, width: u32, height: u32) {
        self.set_pointer(pointer_from_client(x, y, width, height));
        tracing::trace!(x = self.pointer.x, y = self.pointer.y, "pointer");
    }
}

/// Platform-neutral events the game loop cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to a client-area position in physical pixels.
    PointerMoved { x: f64, y: f64 },
    /// Drawable area changed size.
    Resized { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center() {
        assert_eq!(pointer_from_client(0.0, 0.0, 800, 600), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_from_client(400.0, 300.0, 800, 600), Vec2::ZERO);
        assert_eq!(pointer_from_client(800.0, 600.0, 800, 600), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn outside_client_area_is_clamped() {
        assert_eq!(
            pointer_from_client(-50.0, 900.0, 800, 600),
            Vec2::new(-1.0, -1.0)
        );
    }

    #[test]
    fn view_state_starts_centered() {
        assert_eq!(ViewState::default().pointer(), Vec2::ZERO);
    }

    #[test]
    fn set_pointer_clamps() {
        let mut state = ViewState::default();
        state.set_pointer(Vec2::new(4.0, -2.0));
        assert_eq!(state.pointer(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn pointer_moved_updates_state() {
        let mut state = ViewState::default();
        state.pointer_moved(200.0, 150.0, 800, 600);
        assert_eq!(state.pointer(), Vec2::new(-0.5, 0.5));
    }
}
