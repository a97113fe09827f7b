//! Window record and state

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size, Vec2};
use super::WindowId;

/// Display state of an open window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Pointer interaction currently applied to a window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// A floating application window
#[derive(Clone, Debug, PartialEq)]
pub struct Window {
    /// Unique identifier, never reused within a session
    pub id: WindowId,
    /// Application rendering inside this window
    pub app_id: String,
    /// Title bar text
    pub title: String,
    /// Top-left corner in viewport pixels
    pub position: Vec2,
    /// Outer size including chrome
    pub size: Size,
    /// Smallest size the owning application accepts
    pub min_size: Size,
    /// Stacking order (higher = on top)
    pub z_index: u32,
    /// Whether this window has keyboard focus
    pub focused: bool,
    /// Current display state
    pub state: WindowState,
    /// Geometry saved before maximizing
    pub restore_rect: Option<Rect>,
    /// Owning window for sub-windows (dialogs opened by an app)
    pub parent_id: Option<WindowId>,
}

impl Window {
    /// Get the window's bounding rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Check if this window is drawn at all
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state != WindowState::Minimized
    }

    /// Check if this is a sub-window of another window
    #[inline]
    pub fn is_sub_window(&self) -> bool {
        self.parent_id.is_some()
    }
}
