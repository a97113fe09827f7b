//! Input routing module
//!
//! Provides the gesture state machine for window drag and resize.

mod drag;
mod edge;
mod result;
mod router;

pub use drag::DragState;
pub use edge::ResizeEdge;
pub use result::InputResult;
pub use router::InputRouter;

use crate::math::{Rect, Size, Vec2};

/// Calculate the window rectangle after dragging a resize handle by `delta`.
///
/// Moving edges stop at the edges of `area`, and dimensions never drop below
/// `min_size`. The edges opposite the handle stay where they were, so a
/// handle pushed past the area or the minimum never drags the window along.
pub fn calculate_resize(
    edge: ResizeEdge,
    start: Rect,
    delta: Vec2,
    min_size: Size,
    area: Rect,
) -> Rect {
    let mut rect = start;

    if edge.moves_right() {
        let right = (start.right() + delta.x).min(area.right()).max(start.x + min_size.width);
        rect.width = right - start.x;
    }
    if edge.moves_left() {
        rect.x = (start.x + delta.x).max(area.x).min(start.right() - min_size.width);
        rect.width = start.right() - rect.x;
    }
    if edge.moves_bottom() {
        let bottom = (start.bottom() + delta.y).min(area.bottom()).max(start.y + min_size.height);
        rect.height = bottom - start.y;
    }
    if edge.moves_top() {
        rect.y = (start.y + delta.y).max(area.y).min(start.bottom() - min_size.height);
        rect.height = start.bottom() - rect.y;
    }

    rect
}
