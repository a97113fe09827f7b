//! Window lifecycle and operations

use crate::error::{DesktopError, DesktopResult};
use crate::math::{clamp, Rect, Size, Vec2};
use crate::viewport::{viewport_bounds, work_area};
use crate::window::{NewWindow, OpenOptions, WindowId, WindowState};
use super::{check_position, check_size, DesktopSession};

/// Sub-windows default to this fraction of their parent
const SUB_WINDOW_SCALE: f32 = 0.6;
const SUB_WINDOW_MIN: Size = Size::new(360.0, 220.0);
const SUB_WINDOW_MAX: Size = Size::new(720.0, 600.0);
/// Smallest gap between a sub-window and its parent's top-left corner
const SUB_WINDOW_INSET: f32 = 12.0;

/// Geometry of a maximized window: the whole work area
fn maximized_rect(area: Rect, min_size: Size) -> Rect {
    Rect::from_pos_size(area.position(), area.size().clamp(min_size, area.size()))
}

impl DesktopSession {
    /// Open a new window for an app and focus it
    pub fn open(&mut self, app_id: &str, options: OpenOptions) -> DesktopResult<WindowId> {
        let app = self.apps.require(app_id)?;
        let requested = options.size.unwrap_or_else(|| self.default_size_for(app));
        check_size("open", requested)?;
        if let Some(position) = options.position {
            check_position("open", position)?;
        }

        let min_size = self.min_size_for(app);
        let size = self.fit_size(requested, min_size);
        let position = options
            .position
            .unwrap_or_else(|| self.config.cascade.position_for(self.windows.count()));
        let position = self.bounds_for(size).clamp(position);

        let new = NewWindow {
            app_id: app.id.clone(),
            title: options.title.unwrap_or_else(|| app.name.clone()),
            rect: Rect::from_pos_size(position, size),
            min_size,
            parent_id: None,
        };
        let id = self.windows.create(new);
        tracing::debug!(id, app_id, x = position.x, y = position.y, "window opened");
        Ok(id)
    }

    /// Move a window; the position is clamped to the viewport bounds.
    /// Returns the committed position.
    pub fn move_window(&mut self, id: WindowId, x: f32, y: f32) -> DesktopResult<Vec2> {
        let proposed = Vec2::new(x, y);
        check_position("move_window", proposed)?;
        let window = self.windows.require(id)?;
        if window.state == WindowState::Maximized {
            return Err(DesktopError::InvalidOperation {
                op: "move_window",
                reason: "window is maximized",
            });
        }

        let position = self.bounds_for(window.size).clamp(proposed);
        self.windows.transact(|draft| {
            draft.get_mut(id)?.position = position;
            Ok(position)
        })
    }

    /// Resize a window, keeping its top-left corner unless the new size
    /// forces it back inside the bounds. Returns the committed geometry.
    pub fn resize_window(&mut self, id: WindowId, width: f32, height: f32) -> DesktopResult<Rect> {
        let size = Size::new(width, height);
        check_size("resize_window", size)?;
        let position = self.windows.require(id)?.position;
        self.apply_geometry("resize_window", id, Rect::from_pos_size(position, size))
    }

    /// Set size and position together: the size is fitted to
    /// `[min_size, work area]`, then the position is clamped for that size.
    pub(super) fn apply_geometry(&mut self, op: &'static str, id: WindowId, rect: Rect) -> DesktopResult<Rect> {
        let window = self.windows.require(id)?;
        if window.state == WindowState::Maximized {
            return Err(DesktopError::InvalidOperation {
                op,
                reason: "window is maximized",
            });
        }

        let size = self.fit_size(rect.size(), window.min_size);
        let position = self.bounds_for(size).clamp(rect.position());
        let committed = Rect::from_pos_size(position, size);
        self.windows.transact(|draft| {
            let window = draft.get_mut(id)?;
            window.position = position;
            window.size = size;
            Ok(committed)
        })
    }

    /// Focus a window and bring it to the top
    pub fn focus(&mut self, id: WindowId) -> DesktopResult<()> {
        self.windows.focus(id)?;
        tracing::debug!(id, "window focused");
        Ok(())
    }

    /// Give focus to the desktop itself
    pub fn blur(&mut self) {
        self.windows.blur();
    }

    /// Close a window and its sub-windows, returning every removed id
    pub fn close(&mut self, id: WindowId) -> DesktopResult<Vec<WindowId>> {
        let removed = self.windows.close(id)?;
        if self.input.cancel_for(&removed) {
            tracing::debug!(id, "gesture cancelled by close");
        }
        tracing::debug!(id, removed = removed.len(), focus = ?self.windows.focused(), "window closed");
        Ok(removed)
    }

    /// Hide a window in the dock, passing focus on if it had it
    pub fn minimize(&mut self, id: WindowId) -> DesktopResult<()> {
        self.windows.transact(|draft| {
            let window = draft.get_mut(id)?;
            if window.state == WindowState::Minimized {
                return Ok(());
            }
            window.state = WindowState::Minimized;
            if draft.active == Some(id) {
                draft.transfer_focus();
            }
            Ok(())
        })?;
        self.input.cancel_for(&[id]);
        tracing::debug!(id, "window minimized");
        Ok(())
    }

    /// Bring a window back from the dock and focus it.
    ///
    /// A window that was maximized when minimized comes back maximized.
    pub fn restore(&mut self, id: WindowId) -> DesktopResult<()> {
        let area = self.work_area();
        self.windows.transact(|draft| {
            let window = draft.get_mut(id)?;
            if window.state == WindowState::Minimized {
                if window.restore_rect.is_some() {
                    let rect = maximized_rect(area, window.min_size);
                    window.position = rect.position();
                    window.size = rect.size();
                    window.state = WindowState::Maximized;
                } else {
                    window.state = WindowState::Normal;
                }
            }
            draft.raise(id)
        })?;
        tracing::debug!(id, "window restored");
        Ok(())
    }

    /// Maximize a normal window to the work area, or put a maximized one back
    pub fn toggle_maximize(&mut self, id: WindowId) -> DesktopResult<WindowState> {
        let window = self.windows.require(id)?;
        let (rect, restore_rect, state) = match window.state {
            WindowState::Minimized => {
                return Err(DesktopError::InvalidOperation {
                    op: "toggle_maximize",
                    reason: "window is minimized",
                })
            }
            WindowState::Normal => (
                maximized_rect(self.work_area(), window.min_size),
                Some(window.rect()),
                WindowState::Maximized,
            ),
            WindowState::Maximized => {
                let rect = match window.restore_rect {
                    Some(prev) => {
                        let size = self.fit_size(prev.size(), window.min_size);
                        Rect::from_pos_size(self.bounds_for(size).clamp(prev.position()), size)
                    }
                    None => {
                        let size = self.fit_size(window.size, window.min_size);
                        let bounds = self.bounds_for(size);
                        Rect::new(bounds.min_x, bounds.min_y, size.width, size.height)
                    }
                };
                (rect, None, WindowState::Normal)
            }
        };

        self.windows.transact(|draft| {
            let window = draft.get_mut(id)?;
            window.position = rect.position();
            window.size = rect.size();
            window.restore_rect = restore_rect;
            window.state = state;
            draft.raise(id)
        })?;
        self.input.cancel_for(&[id]);
        tracing::debug!(id, ?state, "window maximize toggled");
        Ok(state)
    }

    /// Dock click: open the app, or toggle its window between minimized and
    /// focused. Returns the window acted on.
    pub fn activate_app(&mut self, app_id: &str) -> DesktopResult<WindowId> {
        self.apps.require(app_id)?;
        let existing = self
            .windows
            .iter()
            .filter(|w| w.app_id == app_id && !w.is_sub_window())
            .max_by_key(|w| w.z_index)
            .map(|w| (w.id, w.state));

        match existing {
            Some((id, WindowState::Minimized)) => {
                self.restore(id)?;
                Ok(id)
            }
            Some((id, _)) => {
                self.minimize(id)?;
                Ok(id)
            }
            None => self.open(app_id, OpenOptions::default()),
        }
    }

    /// Open a child window centred over `parent`, owned by the same app.
    ///
    /// Without an explicit size the child takes 60% of the parent, kept
    /// between 360×220 and 720×600.
    pub fn open_sub_window(
        &mut self,
        parent: WindowId,
        title: impl Into<String>,
        size: Option<Size>,
    ) -> DesktopResult<WindowId> {
        let owner = self.windows.require(parent)?;
        if !owner.is_visible() {
            return Err(DesktopError::InvalidOperation {
                op: "open_sub_window",
                reason: "parent window is minimized",
            });
        }
        if let Some(size) = size {
            check_size("open_sub_window", size)?;
        }

        let size = size.unwrap_or_else(|| {
            let scaled = owner.size.scale(SUB_WINDOW_SCALE);
            Size::new(
                clamp(scaled.width.floor(), SUB_WINDOW_MIN.width, SUB_WINDOW_MAX.width),
                clamp(scaled.height.floor(), SUB_WINDOW_MIN.height, SUB_WINDOW_MAX.height),
            )
        });
        let size = self.fit_size(size, owner.min_size);
        let inset = Vec2::new(
            ((owner.size.width - size.width) / 2.0).floor().max(SUB_WINDOW_INSET),
            ((owner.size.height - size.height) / 2.0).floor().max(SUB_WINDOW_INSET),
        );
        let position = self.bounds_for(size).clamp(owner.position + inset);

        let new = NewWindow {
            app_id: owner.app_id.clone(),
            title: title.into(),
            rect: Rect::from_pos_size(position, size),
            min_size: owner.min_size,
            parent_id: Some(parent),
        };
        let id = self.windows.create(new);
        tracing::debug!(id, parent, "sub-window opened");
        Ok(id)
    }

    /// Close every window of an app, sub-windows included
    pub fn close_app_windows(&mut self, app_id: &str) -> DesktopResult<Vec<WindowId>> {
        let targets: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| w.app_id == app_id)
            .map(|w| w.id)
            .collect();
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let removed = self.windows.transact(|draft| {
            let mut removed = Vec::new();
            for id in targets {
                if !removed.contains(&id) {
                    removed.extend(draft.remove_tree(id)?);
                }
            }
            Ok(removed)
        })?;
        self.input.cancel_for(&removed);
        tracing::debug!(app_id, removed = removed.len(), "app windows closed");
        Ok(removed)
    }

    /// Close every window
    pub fn close_all(&mut self) {
        self.windows.clear();
        self.input.end_drag();
        tracing::debug!("all windows closed");
    }

    /// Return to a fresh desktop: no windows, default dock and shortcuts
    pub fn reset(&mut self) {
        self.windows.reset(self.config.initial_z);
        self.input.end_drag();
        self.reset_layout();
        tracing::debug!("desktop reset");
    }

    /// React to a viewport resize: normal windows are clamped back into the
    /// new bounds and maximized windows refit the new work area
    pub fn set_viewport(&mut self, width: f32, height: f32) -> DesktopResult<()> {
        let viewport = Size::new(width, height);
        check_size("set_viewport", viewport)?;
        let chrome = self.config.chrome;
        let area = work_area(viewport, &chrome);

        self.windows.transact(|draft| {
            for window in &mut draft.windows {
                if window.state == WindowState::Maximized {
                    let rect = maximized_rect(area, window.min_size);
                    window.position = rect.position();
                    window.size = rect.size();
                } else {
                    window.position =
                        viewport_bounds(window.size, viewport, &chrome).clamp(window.position);
                }
            }
            Ok(())
        })?;
        self.viewport = viewport;
        tracing::debug!(width, height, "viewport resized");
        Ok(())
    }
}
