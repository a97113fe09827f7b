//! Application catalogue
//!
//! The desktop knows applications only by id. Everything it needs to place a
//! window for an app (name, default and minimum size) lives in an [`AppDef`].

use serde::{Deserialize, Serialize};

use crate::error::{DesktopError, DesktopResult};
use crate::math::Size;

/// Static description of a launchable application
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppDef {
    /// Stable identifier used for routing and persistence
    pub id: String,
    /// Display name, also the default window title
    pub name: String,
    /// Icon glyph or asset name
    #[serde(default)]
    pub icon: Option<String>,
    /// Initial window size (falls back to the desktop default)
    #[serde(default)]
    pub default_size: Option<Size>,
    /// Smallest size the app can draw (falls back to the desktop default)
    #[serde(default)]
    pub min_size: Option<Size>,
}

impl AppDef {
    /// Create an app with default sizing
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            default_size: None,
            min_size: None,
        }
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the default window size
    pub fn with_default_size(mut self, width: f32, height: f32) -> Self {
        self.default_size = Some(Size::new(width, height));
        self
    }

    /// Set the minimum window size
    pub fn with_min_size(mut self, width: f32, height: f32) -> Self {
        self.min_size = Some(Size::new(width, height));
        self
    }
}

/// Ordered set of known applications
#[derive(Clone, Debug, Default)]
pub struct AppRegistry {
    apps: Vec<AppDef>,
}

impl AppRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { apps: Vec::new() }
    }

    /// Build a registry from a list, rejecting duplicate or empty ids
    pub fn from_apps(apps: impl IntoIterator<Item = AppDef>) -> DesktopResult<Self> {
        let mut registry = Self::new();
        for app in apps {
            registry.register(app)?;
        }
        Ok(registry)
    }

    /// Parse a JSON array of app definitions
    pub fn from_json(json: &str) -> DesktopResult<Self> {
        let apps: Vec<AppDef> =
            serde_json::from_str(json).map_err(|e| DesktopError::Config(e.to_string()))?;
        Self::from_apps(apps)
    }

    /// Add an application
    pub fn register(&mut self, app: AppDef) -> DesktopResult<()> {
        if app.id.is_empty() {
            return Err(DesktopError::Config("app id must not be empty".to_string()));
        }
        if self.contains(&app.id) {
            return Err(DesktopError::Config(format!("duplicate app id: {}", app.id)));
        }
        for size in [app.default_size, app.min_size].into_iter().flatten() {
            if !size.is_valid() {
                return Err(DesktopError::Config(format!("invalid size for app {}", app.id)));
            }
        }
        self.apps.push(app);
        Ok(())
    }

    /// Look up an app by id
    pub fn get(&self, id: &str) -> Option<&AppDef> {
        self.apps.iter().find(|app| app.id == id)
    }

    /// Look up an app by id, failing with [`DesktopError::UnknownApp`]
    pub fn require(&self, id: &str) -> DesktopResult<&AppDef> {
        self.get(id).ok_or_else(|| DesktopError::UnknownApp(id.to_string()))
    }

    /// Check whether an app is registered
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Apps in registration order
    pub fn iter(&self) -> impl Iterator<Item = &AppDef> {
        self.apps.iter()
    }

    /// Number of registered apps
    #[inline]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Check if no apps are registered
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
