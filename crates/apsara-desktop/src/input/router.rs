//! Gesture router state machine

use crate::math::{Rect, Vec2};
use crate::window::{Interaction, WindowId};
use super::{DragState, ResizeEdge};

/// Tracks the single in-flight pointer gesture
#[derive(Debug, Default)]
pub struct InputRouter {
    /// Current drag state
    drag: Option<DragState>,
}

impl InputRouter {
    /// Create a new input router
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Get current drag state
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Check if currently dragging
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Interaction state of a given window
    pub fn interaction(&self, id: WindowId) -> Interaction {
        match &self.drag {
            Some(DragState::MoveWindow { window_id, .. }) if *window_id == id => Interaction::Dragging,
            Some(DragState::ResizeWindow { window_id, .. }) if *window_id == id => Interaction::Resizing,
            _ => Interaction::Idle,
        }
    }

    /// Start window move operation
    pub fn start_window_move(&mut self, window_id: WindowId, offset: Vec2) {
        self.drag = Some(DragState::MoveWindow { window_id, offset });
    }

    /// Start window resize operation
    pub fn start_window_resize(
        &mut self,
        window_id: WindowId,
        edge: ResizeEdge,
        start_rect: Rect,
        start_pointer: Vec2,
    ) {
        self.drag = Some(DragState::ResizeWindow {
            window_id,
            edge,
            start_rect,
            start_pointer,
        });
    }

    /// End current drag operation, returning what was in flight
    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    /// Drop the gesture if it targets one of the given windows
    pub fn cancel_for(&mut self, ids: &[WindowId]) -> bool {
        match &self.drag {
            Some(drag) if ids.contains(&drag.window_id()) => {
                self.drag = None;
                true
            }
            _ => false,
        }
    }
}
