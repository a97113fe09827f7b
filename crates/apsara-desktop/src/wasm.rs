//! WASM exports for the desktop
//!
//! This module provides wasm-bindgen exports for the DesktopSession, allowing
//! the browser front end to drive window management directly. Getters return
//! JSON strings. Failed operations are logged and leave the desktop as it was.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Storage};

use crate::app::AppRegistry;
use crate::config::DesktopConfig;
use crate::error::{DesktopError, DesktopResult};
use crate::input::{InputResult, ResizeEdge};
use crate::math::{Size, Vec2};
use crate::persistence::LayoutStore;
use crate::portal::PortalTarget;
use crate::session::DesktopSession;
use crate::shell::DesktopShell;
use crate::viewport::ViewportProvider;
use crate::window::OpenOptions;

/// Viewport measured from the browser window
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserViewport;

impl ViewportProvider for BrowserViewport {
    fn viewport_size(&self) -> Option<Size> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Size::new(width as f32, height as f32))
    }
}

/// Layout store backed by `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> DesktopResult<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| DesktopError::Persistence("localStorage unavailable".to_string()))
    }
}

fn js_error(op: &str, err: JsValue) -> DesktopError {
    DesktopError::Persistence(format!("{}: {:?}", op, err))
}

impl LayoutStore for LocalStorage {
    fn load(&self, key: &str) -> DesktopResult<Option<String>> {
        Self::storage()?.get_item(key).map_err(|e| js_error("getItem", e))
    }

    fn save(&mut self, key: &str, value: &str) -> DesktopResult<()> {
        Self::storage()?.set_item(key, value).map_err(|e| js_error("setItem", e))
    }

    fn remove(&mut self, key: &str) -> DesktopResult<()> {
        Self::storage()?.remove_item(key).map_err(|e| js_error("removeItem", e))
    }
}

/// Log a failed operation and drop the error
fn report<T>(op: &str, result: DesktopResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(op, %err, "desktop operation failed");
            None
        }
    }
}

fn to_js(err: DesktopError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn string_list(array: &js_sys::Array) -> Vec<String> {
    array.iter().filter_map(|v| v.as_string()).collect()
}

fn input_json(result: InputResult) -> String {
    serde_json::to_string(&result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
}

/// Desktop controller for WASM - wraps DesktopSession with JS-friendly API
#[wasm_bindgen]
pub struct DesktopController {
    session: DesktopSession,
    shell: DesktopShell<HtmlElement, ()>,
    store: LocalStorage,
}

#[wasm_bindgen]
impl DesktopController {
    /// Create a controller from a JSON app catalogue and optional JSON
    /// configuration overrides. The stored layout is restored if readable.
    #[wasm_bindgen(constructor)]
    pub fn new(apps_json: &str, config_json: Option<String>) -> Result<DesktopController, JsValue> {
        let config = match config_json {
            Some(json) => DesktopConfig::from_json(&json).map_err(to_js)?,
            None => DesktopConfig::default(),
        };
        let apps = AppRegistry::from_json(apps_json).map_err(to_js)?;
        let mut session = DesktopSession::new(config, apps, &BrowserViewport);

        let store = LocalStorage;
        if let Err(err) = session.load(&store) {
            tracing::warn!(%err, "stored layout unreadable, starting fresh");
        }

        Ok(Self {
            session,
            shell: DesktopShell::new(PortalTarget::InPlace),
            store,
        })
    }

    // =========================================================================
    // Viewport & portal
    // =========================================================================

    /// Resize the desktop viewport
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        report("resize", self.session.set_viewport(width, height));
    }

    /// Mount floating window content into the element with this id.
    /// Returns false (content renders in place) if no such element exists.
    #[wasm_bindgen]
    pub fn set_portal_container(&mut self, element_id: &str) -> bool {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let found = element.is_some();
        self.shell.set_portal(PortalTarget::from_option(element));
        found
    }

    /// Element floating content should be mounted into, if any
    #[wasm_bindgen]
    pub fn portal_container(&self) -> Option<HtmlElement> {
        self.shell.portal().container().cloned()
    }

    /// Get placement bounds for a window as JSON
    #[wasm_bindgen]
    pub fn get_bounds_json(&self, id: u64) -> String {
        match self.session.window_bounds(id) {
            Ok(bounds) => serde_json::to_string(&bounds).unwrap_or_else(|_| "null".to_string()),
            Err(_) => "null".to_string(),
        }
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Open a window; omitted geometry falls back to defaults
    #[wasm_bindgen]
    pub fn open_app(
        &mut self,
        app_id: &str,
        x: Option<f32>,
        y: Option<f32>,
        width: Option<f32>,
        height: Option<f32>,
        title: Option<String>,
    ) -> Option<u64> {
        let options = OpenOptions {
            title,
            position: x.zip(y).map(|(x, y)| Vec2::new(x, y)),
            size: width.zip(height).map(|(w, h)| Size::new(w, h)),
        };
        report("open_app", self.session.open(app_id, options))
    }

    /// Dock click on an app
    #[wasm_bindgen]
    pub fn activate_app(&mut self, app_id: &str) -> Option<u64> {
        report("activate_app", self.session.activate_app(app_id))
    }

    /// Open a sub-window over `parent_id`
    #[wasm_bindgen]
    pub fn open_sub_window(
        &mut self,
        parent_id: u64,
        title: &str,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Option<u64> {
        let size = width.zip(height).map(|(w, h)| Size::new(w, h));
        report("open_sub_window", self.session.open_sub_window(parent_id, title, size))
    }

    #[wasm_bindgen]
    pub fn close_window(&mut self, id: u64) {
        report("close_window", self.session.close(id));
    }

    #[wasm_bindgen]
    pub fn close_app_windows(&mut self, app_id: &str) {
        report("close_app_windows", self.session.close_app_windows(app_id));
    }

    #[wasm_bindgen]
    pub fn close_all(&mut self) {
        self.session.close_all();
    }

    #[wasm_bindgen]
    pub fn focus_window(&mut self, id: u64) {
        report("focus_window", self.session.focus(id));
    }

    #[wasm_bindgen]
    pub fn blur(&mut self) {
        self.session.blur();
    }

    #[wasm_bindgen]
    pub fn move_window(&mut self, id: u64, x: f32, y: f32) {
        report("move_window", self.session.move_window(id, x, y));
    }

    #[wasm_bindgen]
    pub fn resize_window(&mut self, id: u64, width: f32, height: f32) {
        report("resize_window", self.session.resize_window(id, width, height));
    }

    #[wasm_bindgen]
    pub fn minimize_window(&mut self, id: u64) {
        report("minimize_window", self.session.minimize(id));
    }

    #[wasm_bindgen]
    pub fn restore_window(&mut self, id: u64) {
        report("restore_window", self.session.restore(id));
    }

    #[wasm_bindgen]
    pub fn toggle_maximize(&mut self, id: u64) {
        report("toggle_maximize", self.session.toggle_maximize(id));
    }

    /// Get the focused window ID
    #[wasm_bindgen]
    pub fn get_focused_window(&self) -> Option<u64> {
        self.session.focused()
    }

    /// Get the shell frame (menu bar, dock, windows back to front) as JSON
    #[wasm_bindgen]
    pub fn get_frame_json(&self) -> String {
        serde_json::to_string(&self.shell.frame(&self.session)).unwrap_or_else(|_| "{}".to_string())
    }

    // =========================================================================
    // Pointer gestures
    // =========================================================================

    #[wasm_bindgen]
    pub fn begin_drag(&mut self, id: u64, x: f32, y: f32) -> bool {
        report("begin_drag", self.session.begin_drag(id, Vec2::new(x, y))).is_some()
    }

    /// Start a resize from handle `edge` ("n", "se", ...)
    #[wasm_bindgen]
    pub fn begin_resize(&mut self, id: u64, edge: &str, x: f32, y: f32) -> bool {
        let result = edge
            .parse::<ResizeEdge>()
            .and_then(|edge| self.session.begin_resize(id, edge, Vec2::new(x, y)));
        report("begin_resize", result).is_some()
    }

    /// Handle pointer move, returning the InputResult as JSON
    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        input_json(self.session.pointer_move(Vec2::new(x, y)))
    }

    /// Handle pointer up, returning the InputResult as JSON
    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> String {
        input_json(self.session.pointer_up())
    }

    #[wasm_bindgen]
    pub fn cancel_gesture(&mut self) -> bool {
        self.session.cancel_gesture()
    }

    // =========================================================================
    // Dock & shortcuts
    // =========================================================================

    #[wasm_bindgen]
    pub fn pin_app(&mut self, app_id: &str) -> bool {
        report("pin_app", self.session.pin_app(app_id)).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn unpin_app(&mut self, app_id: &str) -> bool {
        self.session.unpin_app(app_id)
    }

    #[wasm_bindgen]
    pub fn set_dock(&mut self, app_ids: js_sys::Array) {
        self.session.set_dock(string_list(&app_ids));
    }

    /// Get desktop shortcuts as JSON
    #[wasm_bindgen]
    pub fn get_desktop_items_json(&self) -> String {
        serde_json::to_string(self.session.desktop_items()).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn reorder_shortcuts(&mut self, active_id: &str, over_id: &str) {
        self.session.reorder_shortcuts(active_id, over_id);
    }

    #[wasm_bindgen]
    pub fn add_to_group(&mut self, item_id: &str, group_id: &str) {
        self.session.add_to_group(item_id, group_id);
    }

    /// Group shortcuts, returning the new group id
    #[wasm_bindgen]
    pub fn create_group(&mut self, label: &str, item_ids: js_sys::Array) -> Option<String> {
        let ids = string_list(&item_ids);
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.session.create_group(label, &refs)
    }

    #[wasm_bindgen]
    pub fn remove_from_group(&mut self, item_id: &str, group_id: &str) {
        self.session.remove_from_group(item_id, group_id);
    }

    #[wasm_bindgen]
    pub fn ungroup(&mut self, group_id: &str) {
        self.session.ungroup(group_id);
    }

    #[wasm_bindgen]
    pub fn rename_group(&mut self, group_id: &str, label: &str) {
        self.session.rename_group(group_id, label);
    }

    #[wasm_bindgen]
    pub fn add_shortcut_for_app(&mut self, app_id: &str) {
        report("add_shortcut_for_app", self.session.add_shortcut_for_app(app_id));
    }

    #[wasm_bindgen]
    pub fn remove_shortcut_for_app(&mut self, app_id: &str) {
        self.session.remove_shortcut_for_app(app_id);
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the layout to localStorage
    #[wasm_bindgen]
    pub fn save(&mut self) -> bool {
        report("save", self.session.save(&mut self.store)).is_some()
    }

    /// Clear every window and the stored layout
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        report("reset", self.session.reset_stored(&mut self.store));
    }
}
