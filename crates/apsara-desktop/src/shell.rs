//! Desktop shell: menu bar, dock, and windows in paint order
//!
//! [`DesktopShell::frame`] projects a session into plain data a front end can
//! draw. [`DesktopShell::render`] goes one step further and asks each app's
//! registered component to render its window content through the portal.

use std::collections::HashMap;

use serde::Serialize;

use crate::math::Rect;
use crate::portal::PortalTarget;
use crate::session::DesktopSession;
use crate::window::{Interaction, Window, WindowId, WindowState};

/// Menu bar along the top edge
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuBar {
    pub height: f32,
    /// Name of the focused window's app (None = desktop has focus)
    pub title: Option<String>,
}

/// One icon in the dock
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DockItem {
    pub app_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub pinned: bool,
    /// At least one window of the app is open
    pub running: bool,
}

/// A window ready to draw
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowFrame {
    pub id: WindowId,
    pub app_id: String,
    pub title: String,
    pub rect: Rect,
    pub z_index: u32,
    pub focused: bool,
    pub state: WindowState,
    pub interaction: Interaction,
    pub parent_id: Option<WindowId>,
}

impl WindowFrame {
    fn new(window: &Window, interaction: Interaction) -> Self {
        Self {
            id: window.id,
            app_id: window.app_id.clone(),
            title: window.title.clone(),
            rect: window.rect(),
            z_index: window.z_index,
            focused: window.focused,
            state: window.state,
            interaction,
            parent_id: window.parent_id,
        }
    }
}

/// Everything on screen, back to front
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShellFrame {
    pub menu_bar: MenuBar,
    pub dock: Vec<DockItem>,
    /// Visible windows sorted by ascending z-index
    pub windows: Vec<WindowFrame>,
}

/// What an app component sees when asked to render its window
pub struct RenderContext<'a, C> {
    pub window: &'a WindowFrame,
    /// Where overlays (menus, popovers) should be mounted
    pub portal: PortalTarget<&'a C>,
}

/// Renders the content of an app's windows
pub trait AppComponent<C> {
    type Output;

    fn render(&self, ctx: &RenderContext<'_, C>) -> Self::Output;
}

type BoxedComponent<C, O> = Box<dyn AppComponent<C, Output = O>>;

/// Desktop shell owning the portal target and the app components
pub struct DesktopShell<C, O> {
    portal: PortalTarget<C>,
    components: HashMap<String, BoxedComponent<C, O>>,
}

impl<C, O> DesktopShell<C, O> {
    /// Create a shell; pass [`PortalTarget::InPlace`] when there is no
    /// overlay container
    pub fn new(portal: PortalTarget<C>) -> Self {
        Self {
            portal,
            components: HashMap::new(),
        }
    }

    #[inline]
    pub fn portal(&self) -> &PortalTarget<C> {
        &self.portal
    }

    /// Point overlays at a new target; registered components are kept
    pub fn set_portal(&mut self, portal: PortalTarget<C>) -> PortalTarget<C> {
        std::mem::replace(&mut self.portal, portal)
    }

    /// Register the component that renders windows of `app_id`,
    /// replacing any earlier one
    pub fn register(
        &mut self,
        app_id: impl Into<String>,
        component: impl AppComponent<C, Output = O> + 'static,
    ) {
        self.components.insert(app_id.into(), Box::new(component));
    }

    pub fn has_component(&self, app_id: &str) -> bool {
        self.components.contains_key(app_id)
    }

    /// Project the session into drawable data
    pub fn frame(&self, session: &DesktopSession) -> ShellFrame {
        let title = session
            .focused()
            .and_then(|id| session.window(id))
            .and_then(|w| session.apps().get(&w.app_id))
            .map(|app| app.name.clone());

        let mut dock: Vec<DockItem> = Vec::new();
        for app_id in session.dock().app_ids() {
            if let Some(app) = session.apps().get(app_id) {
                dock.push(DockItem {
                    app_id: app.id.clone(),
                    name: app.name.clone(),
                    icon: app.icon.clone(),
                    pinned: true,
                    running: session.is_running(&app.id),
                });
            }
        }
        // Running apps that are not pinned follow the pinned ones
        for app in session.apps().iter() {
            if !session.dock().contains(&app.id) && session.is_running(&app.id) {
                dock.push(DockItem {
                    app_id: app.id.clone(),
                    name: app.name.clone(),
                    icon: app.icon.clone(),
                    pinned: false,
                    running: true,
                });
            }
        }

        let windows = session
            .windows()
            .windows_by_z()
            .into_iter()
            .filter(|w| w.is_visible())
            .map(|w| WindowFrame::new(w, session.interaction(w.id)))
            .collect();

        ShellFrame {
            menu_bar: MenuBar {
                height: session.config().chrome.menu_bar_height,
                title,
            },
            dock,
            windows,
        }
    }

    /// Render window contents in paint order.
    ///
    /// Windows whose app has no registered component are skipped.
    pub fn render(&self, session: &DesktopSession) -> Vec<(WindowId, O)> {
        let frame = self.frame(session);
        let mut out = Vec::with_capacity(frame.windows.len());
        for window in &frame.windows {
            let Some(component) = self.components.get(&window.app_id) else {
                tracing::warn!(id = window.id, app_id = %window.app_id, "no component registered for app");
                continue;
            };
            let ctx = RenderContext {
                window,
                portal: self.portal.as_ref(),
            };
            out.push((window.id, component.render(&ctx)));
        }
        out
    }
}
