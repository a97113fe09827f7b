//! Snapshot serialization for the desktop layout

use serde::{Deserialize, Serialize};

use crate::app::AppRegistry;
use crate::error::{DesktopError, DesktopResult};
use crate::math::Rect;
use crate::shortcuts::{self, DesktopItem};
use crate::window::{Window, WindowId, WindowState};

/// One top-level window as stored
///
/// Geometry fields are optional so that hand-edited or truncated layouts
/// still load; missing values fall back when the window is restored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    pub id: WindowId,
    pub app_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub w: Option<f32>,
    #[serde(default)]
    pub h: Option<f32>,
    #[serde(default)]
    pub z: Option<u32>,
    #[serde(default)]
    pub minimized: bool,
    #[serde(default)]
    pub maximized: bool,
    /// Geometry to return to when un-maximizing
    #[serde(default)]
    pub prev: Option<Rect>,
}

impl PersistedWindow {
    /// Capture a live window
    pub fn from_window(window: &Window) -> Self {
        Self {
            id: window.id,
            app_id: window.app_id.clone(),
            title: Some(window.title.clone()),
            x: Some(window.position.x),
            y: Some(window.position.y),
            w: Some(window.size.width),
            h: Some(window.size.height),
            z: Some(window.z_index),
            minimized: window.state == WindowState::Minimized,
            maximized: window.state == WindowState::Maximized,
            prev: window.restore_rect,
        }
    }
}

/// Snapshot of the desktop layout for persistence
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Version for migration support
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default)]
    pub windows: Vec<PersistedWindow>,
    #[serde(default)]
    pub active_id: Option<WindowId>,
    /// Pinned dock apps; `None` keeps the default dock
    #[serde(default)]
    pub dock_app_ids: Option<Vec<String>>,
    #[serde(default)]
    pub desktop_items: Vec<DesktopItem>,
    /// Flat shortcut list written by version 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<Vec<String>>,
}

fn legacy_version() -> u32 {
    1
}

impl Snapshot {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 2;

    /// Create a new snapshot
    pub fn new(
        windows: Vec<PersistedWindow>,
        active_id: Option<WindowId>,
        dock_app_ids: Vec<String>,
        desktop_items: Vec<DesktopItem>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            windows,
            active_id,
            dock_app_ids: Some(dock_app_ids),
            desktop_items,
            shortcuts: None,
        }
    }

    /// Parse a stored snapshot
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        if snapshot.version > Self::CURRENT_VERSION {
            return Err(DesktopError::Persistence(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    pub fn to_json(&self) -> DesktopResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    pub fn migrate(&mut self, apps: &AppRegistry) {
        if self.version < 2 {
            if let Some(ids) = self.shortcuts.take() {
                self.desktop_items = shortcuts::from_app_ids(&ids, apps);
            }
        }
        self.version = Self::CURRENT_VERSION;
    }
}
