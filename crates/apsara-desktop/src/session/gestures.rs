//! Pointer drag and resize handling

use crate::error::{DesktopError, DesktopResult};
use crate::input::{calculate_resize, DragState, InputResult, ResizeEdge};
use crate::math::Vec2;
use crate::window::{WindowId, WindowState};
use super::{check_position, DesktopSession};

impl DesktopSession {
    /// Check that a window can take a pointer gesture
    fn gesture_target(&self, op: &'static str, id: WindowId) -> DesktopResult<()> {
        match self.windows.require(id)?.state {
            WindowState::Normal => Ok(()),
            WindowState::Maximized => Err(DesktopError::InvalidOperation {
                op,
                reason: "window is maximized",
            }),
            WindowState::Minimized => Err(DesktopError::InvalidOperation {
                op,
                reason: "window is minimized",
            }),
        }
    }

    /// Start dragging a window by its title bar; focuses the window
    pub fn begin_drag(&mut self, id: WindowId, pointer: Vec2) -> DesktopResult<()> {
        check_position("begin_drag", pointer)?;
        self.gesture_target("begin_drag", id)?;
        self.windows.focus(id)?;

        let offset = match self.windows.get(id) {
            Some(window) => pointer - window.position,
            None => return Err(DesktopError::WindowNotFound(id)),
        };
        self.input.start_window_move(id, offset);
        tracing::debug!(id, "drag started");
        Ok(())
    }

    /// Start resizing a window from one of its handles; focuses the window
    pub fn begin_resize(&mut self, id: WindowId, edge: ResizeEdge, pointer: Vec2) -> DesktopResult<()> {
        check_position("begin_resize", pointer)?;
        self.gesture_target("begin_resize", id)?;
        self.windows.focus(id)?;

        let start_rect = match self.windows.get(id) {
            Some(window) => window.rect(),
            None => return Err(DesktopError::WindowNotFound(id)),
        };
        self.input.start_window_resize(id, edge, start_rect, pointer);
        tracing::debug!(id, ?edge, "resize started");
        Ok(())
    }

    /// Handle pointer move
    ///
    /// Moves with no gesture in flight, or whose window has gone away, are
    /// discarded.
    pub fn pointer_move(&mut self, pointer: Vec2) -> InputResult {
        if !pointer.is_finite() {
            tracing::warn!(?pointer, "ignoring non-finite pointer position");
            return InputResult::Unhandled;
        }

        let drag_state = match self.input.drag_state() {
            Some(state) => state.clone(),
            None => return InputResult::Unhandled,
        };
        let window_id = drag_state.window_id();
        let min_size = match self.windows.get(window_id) {
            Some(window) => window.min_size,
            None => {
                tracing::warn!(window_id, "dropping gesture for a closed window");
                self.input.end_drag();
                return InputResult::Unhandled;
            }
        };

        let result = match drag_state {
            DragState::MoveWindow { window_id, offset } => {
                let target = pointer - offset;
                self.move_window(window_id, target.x, target.y).map(|_| ())
            }
            DragState::ResizeWindow { window_id, edge, start_rect, start_pointer } => {
                let delta = pointer - start_pointer;
                let rect = calculate_resize(edge, start_rect, delta, min_size, self.placement_area());
                self.apply_geometry("resize_window", window_id, rect).map(|_| ())
            }
        };

        match result {
            Ok(()) => InputResult::Handled,
            Err(err) => {
                tracing::warn!(%err, "pointer move rejected");
                InputResult::Unhandled
            }
        }
    }

    /// Handle pointer up, ending any gesture
    pub fn pointer_up(&mut self) -> InputResult {
        match self.input.end_drag() {
            Some(state) => {
                tracing::debug!(id = state.window_id(), "gesture ended");
                InputResult::Handled
            }
            None => InputResult::Unhandled,
        }
    }

    /// Abandon the current gesture, keeping the geometry reached so far.
    /// Returns false if nothing was in flight.
    pub fn cancel_gesture(&mut self) -> bool {
        self.input.end_drag().is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::{InputResult, ResizeEdge};
    use crate::math::{Size, Vec2};
    use crate::session::test_support::*;
    use crate::window::{Interaction, OpenOptions};

    #[test]
    fn test_drag_moves_and_clamps() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::at(100.0, 100.0)).unwrap();

        s.begin_drag(id, Vec2::new(150.0, 110.0)).unwrap();
        assert_eq!(s.interaction(id), Interaction::Dragging);

        assert_eq!(s.pointer_move(Vec2::new(250.0, 210.0)), InputResult::Handled);
        assert_eq!(s.window(id).unwrap().position, Vec2::new(200.0, 200.0));

        assert_eq!(s.pointer_move(Vec2::new(-500.0, -500.0)), InputResult::Handled);
        assert_eq!(s.window(id).unwrap().position, Vec2::new(8.0, 36.0));

        assert_eq!(s.pointer_up(), InputResult::Handled);
        assert_eq!(s.interaction(id), Interaction::Idle);
        assert_eq!(s.pointer_up(), InputResult::Unhandled);
    }

    #[test]
    fn test_begin_drag_focuses() {
        let mut s = session();
        let a = s.open("notes", OpenOptions::default()).unwrap();
        let b = s.open("mail", OpenOptions::default()).unwrap();
        assert_eq!(s.focused(), Some(b));

        s.begin_drag(a, Vec2::new(100.0, 130.0)).unwrap();
        assert_eq!(s.focused(), Some(a));
    }

    #[test]
    fn test_move_without_gesture_is_unhandled() {
        let mut s = session();
        s.open("notes", OpenOptions::default()).unwrap();
        let before = s.snapshot();
        assert_eq!(s.pointer_move(Vec2::new(10.0, 10.0)), InputResult::Unhandled);
        assert!(std::sync::Arc::ptr_eq(&before, &s.snapshot()));
    }

    #[test]
    fn test_close_cancels_gesture() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::default()).unwrap();
        s.begin_drag(id, Vec2::new(100.0, 130.0)).unwrap();

        s.close(id).unwrap();
        assert!(s.gesture().is_none());
        assert_eq!(s.pointer_move(Vec2::new(300.0, 300.0)), InputResult::Unhandled);
    }

    #[test]
    fn test_resize_gesture_anchors_opposite_edge() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::at(300.0, 200.0)).unwrap();

        s.begin_resize(id, ResizeEdge::W, Vec2::new(300.0, 250.0)).unwrap();
        assert_eq!(s.interaction(id), Interaction::Resizing);

        // Dragging the left edge far right stops at the minimum width
        s.pointer_move(Vec2::new(900.0, 250.0));
        let w = s.window(id).unwrap();
        assert_eq!(w.size, Size::new(200.0, 300.0));
        assert!((w.position.x - 500.0).abs() < 0.001);

        s.pointer_move(Vec2::new(250.0, 250.0));
        let w = s.window(id).unwrap();
        assert_eq!(w.size, Size::new(450.0, 300.0));
        assert!((w.position.x - 250.0).abs() < 0.001);
        s.pointer_up();
    }

    #[test]
    fn test_resize_gesture_past_left_margin_keeps_right_edge() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::at(300.0, 200.0)).unwrap();

        s.begin_resize(id, ResizeEdge::W, Vec2::new(300.0, 250.0)).unwrap();
        assert_eq!(s.pointer_move(Vec2::new(-500.0, 250.0)), InputResult::Handled);
        let rect = s.window(id).unwrap().rect();
        assert!((rect.x - 8.0).abs() < 0.001);
        assert!((rect.right() - 700.0).abs() < 0.001);
        assert!((rect.y - 200.0).abs() < 0.001);
        s.pointer_up();
    }

    #[test]
    fn test_resize_gesture_past_menu_bar_keeps_bottom_edge() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::at(300.0, 200.0)).unwrap();

        s.begin_resize(id, ResizeEdge::N, Vec2::new(500.0, 200.0)).unwrap();
        assert_eq!(s.pointer_move(Vec2::new(500.0, 0.0)), InputResult::Handled);
        let rect = s.window(id).unwrap().rect();
        assert!((rect.y - 36.0).abs() < 0.001);
        assert!((rect.bottom() - 500.0).abs() < 0.001);
        assert!((rect.x - 300.0).abs() < 0.001);
        s.pointer_up();
    }

    #[test]
    fn test_resize_gesture_south_east() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::at(100.0, 100.0)).unwrap();

        s.begin_resize(id, ResizeEdge::SE, Vec2::new(500.0, 400.0)).unwrap();
        s.pointer_move(Vec2::new(600.0, 420.0));
        let w = s.window(id).unwrap();
        assert_eq!(w.size, Size::new(500.0, 320.0));
        assert_eq!(w.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_maximized_window_rejects_gestures() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::default()).unwrap();
        s.toggle_maximize(id).unwrap();

        assert!(s.begin_drag(id, Vec2::new(10.0, 40.0)).is_err());
        assert!(s.begin_resize(id, ResizeEdge::S, Vec2::new(10.0, 40.0)).is_err());
        assert!(s.gesture().is_none());
    }

    #[test]
    fn test_cancel_gesture() {
        let mut s = session();
        let id = s.open("notes", OpenOptions::default()).unwrap();
        assert!(!s.cancel_gesture());
        s.begin_drag(id, Vec2::new(100.0, 130.0)).unwrap();
        assert!(s.cancel_gesture());
        assert_eq!(s.interaction(id), Interaction::Idle);
    }
}
