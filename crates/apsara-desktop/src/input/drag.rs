//! Drag state for pointer gestures

use crate::math::{Rect, Vec2};
use crate::window::WindowId;
use super::ResizeEdge;

/// Current gesture state
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    /// Moving a window
    MoveWindow {
        /// Window being moved
        window_id: WindowId,
        /// Offset from window origin to pointer
        offset: Vec2,
    },
    /// Resizing a window
    ResizeWindow {
        /// Window being resized
        window_id: WindowId,
        /// Which resize handle
        edge: ResizeEdge,
        /// Window geometry when the gesture started
        start_rect: Rect,
        /// Pointer position when the gesture started
        start_pointer: Vec2,
    },
}

impl DragState {
    /// Check if this is a window move operation
    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, DragState::MoveWindow { .. })
    }

    /// Check if this is a window resize operation
    #[inline]
    pub fn is_resize(&self) -> bool {
        matches!(self, DragState::ResizeWindow { .. })
    }

    /// Get the window the gesture applies to
    pub fn window_id(&self) -> WindowId {
        match self {
            DragState::MoveWindow { window_id, .. } => *window_id,
            DragState::ResizeWindow { window_id, .. } => *window_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_window_state() {
        let state = DragState::MoveWindow {
            window_id: 42,
            offset: Vec2::new(10.0, 20.0),
        };

        assert!(state.is_move());
        assert!(!state.is_resize());
        assert_eq!(state.window_id(), 42);
    }

    #[test]
    fn test_resize_window_preserves_all_fields() {
        let state = DragState::ResizeWindow {
            window_id: 99,
            edge: ResizeEdge::NW,
            start_rect: Rect::new(50.0, 75.0, 400.0, 300.0),
            start_pointer: Vec2::new(60.0, 85.0),
        };

        assert!(state.is_resize());
        if let DragState::ResizeWindow { window_id, edge, start_rect, start_pointer } = state {
            assert_eq!(window_id, 99);
            assert_eq!(edge, ResizeEdge::NW);
            assert!((start_rect.x - 50.0).abs() < 0.001);
            assert!((start_rect.height - 300.0).abs() < 0.001);
            assert!((start_pointer.y - 85.0).abs() < 0.001);
        } else {
            panic!("Expected ResizeWindow state");
        }
    }
}
