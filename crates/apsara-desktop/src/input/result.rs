//! Input result type

use serde::Serialize;

/// Result of feeding a pointer event to the desktop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// The event changed desktop state
    Handled,
    /// The event was discarded (no gesture, or a stale one)
    Unhandled,
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled)
    }
}
