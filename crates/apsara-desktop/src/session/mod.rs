//! Desktop session coordinating all components
//!
//! This module is split into focused submodules:
//! - `windows`: Window lifecycle and operations
//! - `gestures`: Pointer drag and resize handling
//! - `layout`: Dock, desktop shortcuts, and persistence

mod gestures;
mod layout;
mod windows;

use crate::app::{AppDef, AppRegistry};
use crate::config::DesktopConfig;
use crate::dock::Dock;
use crate::error::{DesktopError, DesktopResult};
use crate::input::{DragState, InputRouter};
use crate::math::{Rect, Size, Vec2};
use crate::shortcuts::{self, DesktopItem};
use crate::viewport::{self, measure_viewport, ViewportBounds, ViewportProvider};
use crate::window::{Interaction, Window, WindowId, WindowManager, WindowSnapshot};

/// Desktop session owning every window and the state around them
///
/// This is the main entry point for desktop operations, managing:
/// - Window manager (window collection, focus, z-order)
/// - Viewport size and the placement bounds derived from it
/// - Input router (drag/resize state machine)
/// - Dock and desktop shortcuts
///
/// Every mutating operation either succeeds completely or returns an error
/// and leaves the session as it was.
#[derive(Debug)]
pub struct DesktopSession {
    config: DesktopConfig,
    apps: AppRegistry,
    windows: WindowManager,
    viewport: Size,
    input: InputRouter,
    dock: Dock,
    desktop_items: Vec<DesktopItem>,
    /// Counter behind generated shortcut group ids
    next_group: u64,
}

impl DesktopSession {
    /// Create an empty desktop, measuring the viewport once through `provider`
    pub fn new(config: DesktopConfig, apps: AppRegistry, provider: &dyn ViewportProvider) -> Self {
        let viewport = measure_viewport(provider, config.default_viewport);
        let dock = Dock::with_defaults(&apps, config.initial_dock_items, config.max_dock_items);
        let desktop_items = shortcuts::default_items(&apps);
        tracing::debug!(?viewport, apps = apps.len(), "desktop session created");

        Self {
            windows: WindowManager::new(config.initial_z),
            input: InputRouter::new(),
            config,
            apps,
            viewport,
            dock,
            desktop_items,
            next_group: 1,
        }
    }

    #[inline]
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    #[inline]
    pub fn apps(&self) -> &AppRegistry {
        &self.apps
    }

    /// Window collection, z-order, and focus
    #[inline]
    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    /// Current window collection; stays valid across later mutations
    #[inline]
    pub fn snapshot(&self) -> WindowSnapshot {
        self.windows.snapshot()
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id)
    }

    /// Focused window (None = desktop has focus)
    #[inline]
    pub fn focused(&self) -> Option<WindowId> {
        self.windows.focused()
    }

    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Area between the menu bar and the dock
    pub fn work_area(&self) -> Rect {
        viewport::work_area(self.viewport, &self.config.chrome)
    }

    /// Region normal windows are kept inside while resizing
    pub fn placement_area(&self) -> Rect {
        viewport::placement_area(self.viewport, &self.config.chrome)
    }

    /// Placement range for a window of the given size in the current viewport
    pub fn bounds_for(&self, size: Size) -> ViewportBounds {
        viewport::viewport_bounds(size, self.viewport, &self.config.chrome)
    }

    /// Placement range for an open window
    pub fn window_bounds(&self, id: WindowId) -> DesktopResult<ViewportBounds> {
        Ok(self.bounds_for(self.windows.require(id)?.size))
    }

    #[inline]
    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    #[inline]
    pub fn desktop_items(&self) -> &[DesktopItem] {
        &self.desktop_items
    }

    /// Interaction currently applied to a window
    pub fn interaction(&self, id: WindowId) -> Interaction {
        self.input.interaction(id)
    }

    /// In-flight pointer gesture, if any
    #[inline]
    pub fn gesture(&self) -> Option<&DragState> {
        self.input.drag_state()
    }

    /// Check whether any top-level window of an app is open
    pub fn is_running(&self, app_id: &str) -> bool {
        self.windows.iter().any(|w| w.app_id == app_id && !w.is_sub_window())
    }

    fn min_size_for(&self, app: &AppDef) -> Size {
        app.min_size.unwrap_or(self.config.min_window_size)
    }

    fn default_size_for(&self, app: &AppDef) -> Size {
        app.default_size.unwrap_or(self.config.default_window_size)
    }

    /// Constrain a size to `[min, work area]`
    fn fit_size(&self, size: Size, min: Size) -> Size {
        size.clamp(min, self.work_area().size())
    }
}

pub(crate) fn check_position(op: &'static str, position: Vec2) -> DesktopResult<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(DesktopError::InvalidGeometry {
            op,
            reason: "position must be finite",
        })
    }
}

pub(crate) fn check_size(op: &'static str, size: Size) -> DesktopResult<()> {
    if size.is_valid() {
        Ok(())
    } else {
        Err(DesktopError::InvalidGeometry {
            op,
            reason: "size must be finite and positive",
        })
    }
}
