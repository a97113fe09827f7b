//! Options for opening a window

use crate::math::{Size, Vec2};

/// Caller overrides for a newly opened window
///
/// Anything left as `None` comes from the app definition or the desktop
/// configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpenOptions {
    /// Title (defaults to the app name)
    pub title: Option<String>,
    /// Initial position (None = cascade)
    pub position: Option<Vec2>,
    /// Initial size (None = app default)
    pub size: Option<Size>,
}

impl OpenOptions {
    /// Options with an explicit position
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Some(Vec2::new(x, y)),
            ..Default::default()
        }
    }

    /// Set the size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
