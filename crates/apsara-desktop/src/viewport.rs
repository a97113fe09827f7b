//! Viewport measurement and the legal placement range for windows

use serde::Serialize;

use crate::config::ChromeMetrics;
use crate::math::{clamp, Rect, Size, Vec2};

/// Source of the current viewport dimensions
///
/// Injected into the session instead of reading a browser global, so the
/// bounds math stays a pure function of its inputs.
pub trait ViewportProvider {
    /// Current viewport size, or `None` when it cannot be measured
    fn viewport_size(&self) -> Option<Size>;
}

/// A provider that always reports the same size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedViewport(pub Size);

impl ViewportProvider for FixedViewport {
    fn viewport_size(&self) -> Option<Size> {
        Some(self.0)
    }
}

/// A provider for contexts with no viewport at all (tests, server rendering)
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl ViewportProvider for Headless {
    fn viewport_size(&self) -> Option<Size> {
        None
    }
}

/// Measure the viewport, falling back to `fallback` when the measurement is
/// missing or unusable
pub fn measure_viewport(provider: &dyn ViewportProvider, fallback: Size) -> Size {
    match provider.viewport_size() {
        Some(size) if size.is_valid() => size,
        Some(size) => {
            tracing::warn!(?size, "ignoring unusable viewport measurement");
            fallback
        }
        None => fallback,
    }
}

/// Legal range for a window's top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewportBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl ViewportBounds {
    /// Clamp a proposed position into the range
    #[inline]
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            clamp(position.x, self.min_x, self.max_x),
            clamp(position.y, self.min_y, self.max_y),
        )
    }

    /// Check whether a position already lies inside the range
    #[inline]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }
}

/// Compute the placement range for a window of `window` size.
///
/// The menu bar and edge margin are reserved at the top, the dock at the
/// bottom, the edge margin on the left and right. When the window is larger
/// than the remaining space the maximum collapses onto the minimum, so the
/// window pins to the margin instead of producing an inverted range.
pub fn viewport_bounds(window: Size, viewport: Size, chrome: &ChromeMetrics) -> ViewportBounds {
    let min_x = chrome.edge_margin;
    let max_x = min_x.max(viewport.width - window.width - chrome.edge_margin);
    let min_y = chrome.menu_bar_height + chrome.edge_margin;
    let max_y = min_y.max(viewport.height - window.height - chrome.dock_height);

    ViewportBounds {
        min_x,
        max_x,
        min_y,
        max_y,
    }
}

/// Area between the menu bar and the dock, used for maximized windows
pub fn work_area(viewport: Size, chrome: &ChromeMetrics) -> Rect {
    let top = chrome.menu_bar_height;
    let height = (viewport.height - chrome.menu_bar_height - chrome.dock_height).max(1.0);
    Rect::new(0.0, top, viewport.width.max(1.0), height)
}

/// Region a normal window's edges may occupy: inside the edge margin, below
/// the menu bar, and above the dock. Any rect inside it also satisfies
/// [`viewport_bounds`].
pub fn placement_area(viewport: Size, chrome: &ChromeMetrics) -> Rect {
    let left = chrome.edge_margin;
    let top = chrome.menu_bar_height + chrome.edge_margin;
    let right = (viewport.width - chrome.edge_margin).max(left);
    let bottom = (viewport.height - chrome.dock_height).max(top);
    Rect::new(left, top, right - left, bottom - top)
}
