//! Core geometry types for the desktop
//!
//! Positions and sizes are in viewport pixels with a top-left origin.

mod clamp;
mod rect;
mod size;
mod vec2;

pub use clamp::clamp;
pub use rect::Rect;
pub use size::Size;
pub use vec2::Vec2;
