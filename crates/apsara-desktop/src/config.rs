//! Desktop configuration
//!
//! Chrome metrics, window defaults, and limits. Every field has a default so a
//! partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::error::{DesktopError, DesktopResult};
use crate::math::{Size, Vec2};

/// Screen space reserved by the desktop chrome
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeMetrics {
    /// Height of the menu bar along the top edge
    pub menu_bar_height: f32,
    /// Height reserved for the dock along the bottom edge
    pub dock_height: f32,
    /// Minimal gap kept between a window and the viewport edges
    pub edge_margin: f32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            menu_bar_height: 28.0,
            dock_height: 96.0,
            edge_margin: 8.0,
        }
    }
}

/// Cascade placement for windows opened without an explicit position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Position of the first window in a cascade
    pub origin: Vec2,
    /// Offset added per already-open window
    pub step: Vec2,
    /// Number of steps before the cascade wraps back to the origin
    pub period: u32,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::new(80.0, 120.0),
            step: Vec2::new(24.0, 16.0),
            period: 6,
        }
    }
}

impl CascadeConfig {
    /// Position for the next window given how many are already open
    pub fn position_for(&self, open_count: usize) -> Vec2 {
        let slot = (open_count % self.period.max(1) as usize) as f32;
        self.origin + self.step * slot
    }
}

/// Top-level desktop configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub chrome: ChromeMetrics,
    /// Viewport assumed when no measurement is available
    pub default_viewport: Size,
    /// Size used when an app does not declare one
    pub default_window_size: Size,
    /// Minimum size used when an app does not declare one
    pub min_window_size: Size,
    pub cascade: CascadeConfig,
    /// Z-index seed; the first window opened gets `initial_z + 1`
    pub initial_z: u32,
    /// Hard cap on pinned dock entries
    pub max_dock_items: usize,
    /// Number of catalogue apps pinned to a fresh dock
    pub initial_dock_items: usize,
    /// Key under which the layout snapshot is stored
    pub storage_key: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            chrome: ChromeMetrics::default(),
            default_viewport: Size::new(1280.0, 720.0),
            default_window_size: Size::new(640.0, 380.0),
            min_window_size: Size::new(200.0, 150.0),
            cascade: CascadeConfig::default(),
            initial_z: 10,
            max_dock_items: 10,
            initial_dock_items: 8,
            storage_key: "apsara.os.desktop-state".to_string(),
        }
    }
}

impl DesktopConfig {
    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        let config: DesktopConfig =
            serde_json::from_str(json).map_err(|e| DesktopError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the geometry code cannot work with
    pub fn validate(&self) -> DesktopResult<()> {
        let chrome = &self.chrome;
        let metrics = [chrome.menu_bar_height, chrome.dock_height, chrome.edge_margin];
        if metrics.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(DesktopError::Config(
                "chrome metrics must be finite and non-negative".to_string(),
            ));
        }
        if !self.default_viewport.is_valid() {
            return Err(DesktopError::Config("default_viewport must be positive".to_string()));
        }
        if !self.default_window_size.is_valid() || !self.min_window_size.is_valid() {
            return Err(DesktopError::Config("window sizes must be positive".to_string()));
        }
        if !self.cascade.origin.is_finite() || !self.cascade.step.is_finite() {
            return Err(DesktopError::Config("cascade offsets must be finite".to_string()));
        }
        if self.storage_key.is_empty() {
            return Err(DesktopError::Config("storage_key must not be empty".to_string()));
        }
        Ok(())
    }
}
