//! 2D size type for window and viewport dimensions

use serde::{Deserialize, Serialize};

/// Width and height in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if size is zero or negative
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// A usable size: both dimensions finite and strictly positive
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && !self.is_empty()
    }

    /// Scale both dimensions
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Clamp size to minimum and maximum
    ///
    /// The minimum wins when it exceeds the maximum, so a window never
    /// shrinks below what its application can draw.
    #[inline]
    pub fn clamp(self, min: Size, max: Size) -> Self {
        Self::new(
            self.width.min(max.width).max(min.width),
            self.height.min(max.height).max(min.height),
        )
    }
}
