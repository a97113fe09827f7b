//! Dock, desktop shortcuts, and layout persistence

use crate::dock::Dock;
use crate::error::DesktopResult;
use crate::math::{Rect, Size, Vec2};
use crate::persistence::{LayoutStore, PersistedWindow, Snapshot};
use crate::shortcuts;
use crate::window::{Window, WindowId, WindowManager, WindowState};
use super::DesktopSession;

impl DesktopSession {
    /// Pin an app to the dock; false if already pinned or the dock is full
    pub fn pin_app(&mut self, app_id: &str) -> DesktopResult<bool> {
        self.apps.require(app_id)?;
        Ok(self.dock.pin(app_id))
    }

    pub fn unpin_app(&mut self, app_id: &str) -> bool {
        self.dock.unpin(app_id)
    }

    /// Replace the pinned apps; unknown ids are dropped
    pub fn set_dock<I, S>(&mut self, app_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dock.set(app_ids);
        self.dock.retain_known(&self.apps);
    }

    pub fn reorder_shortcuts(&mut self, active_id: &str, over_id: &str) {
        self.desktop_items = shortcuts::reorder(&self.desktop_items, active_id, over_id);
    }

    pub fn add_to_group(&mut self, item_id: &str, group_id: &str) {
        self.desktop_items = shortcuts::add_to_group(&self.desktop_items, item_id, group_id);
    }

    /// Group shortcuts under a new id, returned when a group was created
    pub fn create_group(&mut self, label: &str, item_ids: &[&str]) -> Option<String> {
        let group_id = self.next_group_id();
        let next = shortcuts::create_group(&self.desktop_items, &group_id, label, item_ids);
        if next == self.desktop_items {
            return None;
        }
        self.desktop_items = next;
        self.next_group += 1;
        Some(group_id)
    }

    pub fn remove_from_group(&mut self, item_id: &str, group_id: &str) {
        self.desktop_items = shortcuts::remove_from_group(&self.desktop_items, item_id, group_id);
    }

    pub fn ungroup(&mut self, group_id: &str) {
        self.desktop_items = shortcuts::ungroup(&self.desktop_items, group_id);
    }

    pub fn rename_group(&mut self, group_id: &str, label: &str) {
        self.desktop_items = shortcuts::rename_group(&self.desktop_items, group_id, label);
    }

    pub fn add_shortcut_for_app(&mut self, app_id: &str) -> DesktopResult<()> {
        let app = self.apps.require(app_id)?;
        self.desktop_items = shortcuts::add_for_app(&self.desktop_items, app);
        Ok(())
    }

    pub fn remove_shortcut_for_app(&mut self, app_id: &str) {
        self.desktop_items = shortcuts::remove_for_app(&self.desktop_items, app_id);
    }

    /// First `grp-N` id not already on the desktop
    fn next_group_id(&mut self) -> String {
        loop {
            let id = format!("grp-{}", self.next_group);
            if !self.desktop_items.iter().any(|item| item.id() == id) {
                return id;
            }
            self.next_group += 1;
        }
    }

    /// Default dock and shortcuts
    pub(super) fn reset_layout(&mut self) {
        self.dock = self.default_dock();
        self.desktop_items = shortcuts::default_items(&self.apps);
        self.next_group = 1;
    }

    fn default_dock(&self) -> Dock {
        Dock::with_defaults(&self.apps, self.config.initial_dock_items, self.config.max_dock_items)
    }

    /// Check if there is nothing worth storing: no windows, no focus, and
    /// the default dock and shortcuts
    pub fn is_default_layout(&self) -> bool {
        self.windows.iter().all(|w| w.is_sub_window())
            && self.windows.focused().is_none()
            && self.dock == self.default_dock()
            && self.desktop_items == shortcuts::default_items(&self.apps)
    }

    /// Capture the layout; sub-windows are left out
    pub fn to_snapshot(&self) -> Snapshot {
        let windows = self
            .windows
            .iter()
            .filter(|w| !w.is_sub_window())
            .map(PersistedWindow::from_window)
            .collect();
        Snapshot::new(
            windows,
            self.focused().map(|id| self.root_of(id)),
            self.dock.app_ids().to_vec(),
            self.desktop_items.clone(),
        )
    }

    /// Top-level ancestor of a window
    fn root_of(&self, mut id: WindowId) -> WindowId {
        while let Some(parent) = self.windows.get(id).and_then(|w| w.parent_id) {
            id = parent;
        }
        id
    }

    /// Write the layout under the configured key. The default layout clears
    /// the key instead.
    pub fn save(&self, store: &mut dyn LayoutStore) -> DesktopResult<()> {
        let key = &self.config.storage_key;
        if self.is_default_layout() {
            tracing::debug!(key = %key, "default layout, clearing stored snapshot");
            return store.remove(key);
        }
        let json = self.to_snapshot().to_json()?;
        store.save(key, &json)?;
        tracing::debug!(key = %key, bytes = json.len(), "layout saved");
        Ok(())
    }

    /// Restore the layout stored under the configured key.
    ///
    /// Returns false when nothing is stored. On error the session is left
    /// untouched.
    pub fn load(&mut self, store: &dyn LayoutStore) -> DesktopResult<bool> {
        let Some(json) = store.load(&self.config.storage_key)? else {
            return Ok(false);
        };
        let snapshot = Snapshot::from_json(&json)?;
        self.apply_snapshot(snapshot);
        Ok(true)
    }

    /// Forget the stored layout and return to a fresh desktop
    pub fn reset_stored(&mut self, store: &mut dyn LayoutStore) -> DesktopResult<()> {
        self.reset();
        store.remove(&self.config.storage_key)
    }

    /// Replace windows, dock, and shortcuts with a snapshot's contents.
    ///
    /// Windows of unknown apps are dropped, missing or unusable geometry
    /// falls back to defaults, and every window is fitted to the current
    /// viewport.
    pub fn apply_snapshot(&mut self, mut snapshot: Snapshot) {
        if snapshot.needs_migration() {
            tracing::debug!(from = snapshot.version, "migrating layout snapshot");
            snapshot.migrate(&self.apps);
        }

        let mut restored: Vec<Window> = Vec::with_capacity(snapshot.windows.len());
        for persisted in snapshot.windows {
            if restored.iter().any(|w| w.id == persisted.id) {
                tracing::warn!(id = persisted.id, "dropping duplicate window id");
                continue;
            }
            if let Some(window) = self.restore_window(persisted) {
                restored.push(window);
            }
        }

        let count = restored.len();
        self.windows = WindowManager::restore(restored, snapshot.active_id, self.config.initial_z);
        self.input.end_drag();
        self.dock = match snapshot.dock_app_ids {
            Some(ids) => {
                let mut dock = Dock::new(ids, self.config.max_dock_items);
                dock.retain_known(&self.apps);
                dock
            }
            None => self.default_dock(),
        };
        self.desktop_items = shortcuts::sanitize(snapshot.desktop_items, &self.apps);
        tracing::debug!(windows = count, focus = ?self.windows.focused(), "layout restored");
    }

    fn restore_window(&self, persisted: PersistedWindow) -> Option<Window> {
        let Some(app) = self.apps.get(&persisted.app_id) else {
            tracing::warn!(app_id = %persisted.app_id, "dropping window of unknown app");
            return None;
        };

        let origin = self.config.cascade.origin;
        let default = self.default_size_for(app);
        let min_size = self.min_size_for(app);
        let finite = |v: Option<f32>| v.filter(|v| v.is_finite());
        let positive = |v: Option<f32>| v.filter(|v| v.is_finite() && *v > 0.0);

        let size = Size::new(
            positive(persisted.w).unwrap_or(default.width),
            positive(persisted.h).unwrap_or(default.height),
        );
        let size = self.fit_size(size, min_size);
        let position = Vec2::new(
            finite(persisted.x).unwrap_or(origin.x),
            finite(persisted.y).unwrap_or(origin.y),
        );
        let mut rect = Rect::from_pos_size(self.bounds_for(size).clamp(position), size);

        let restore_rect = if persisted.maximized {
            let prev = persisted.prev.filter(Rect::is_valid).unwrap_or(rect);
            let area = self.work_area();
            rect = Rect::from_pos_size(area.position(), area.size().clamp(min_size, area.size()));
            Some(prev)
        } else {
            None
        };
        let state = if persisted.minimized {
            WindowState::Minimized
        } else if persisted.maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        };

        Some(Window {
            id: persisted.id,
            app_id: app.id.clone(),
            title: persisted.title.unwrap_or_else(|| app.name.clone()),
            position: rect.position(),
            size: rect.size(),
            min_size,
            z_index: persisted.z.unwrap_or(0),
            focused: false,
            state,
            restore_rect,
            parent_id: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{Size, Vec2};
    use crate::persistence::{LayoutStore, MemoryStore, Snapshot};
    use crate::session::test_support::*;
    use crate::shortcuts::{self, DesktopItem};
    use crate::window::{OpenOptions, WindowState};

    const KEY: &str = "apsara.os.desktop-state";

    #[test]
    fn test_dock_operations() {
        let mut s = session();
        assert!(!s.pin_app("notes").unwrap());
        assert!(s.unpin_app("notes"));
        assert!(s.pin_app("notes").unwrap());
        assert!(s.pin_app("ghost").is_err());

        s.set_dock(["maps", "ghost", "maps", "finder"]);
        assert_eq!(s.dock().app_ids(), ["maps", "finder"]);
    }

    #[test]
    fn test_group_ids_are_unique() {
        let mut s = session();
        let g1 = s.create_group("Work", &["notes", "mail"]).unwrap();
        let g2 = s.create_group("", &["maps"]).unwrap();
        assert_eq!(g1, "grp-1");
        assert_eq!(g2, "grp-2");
        assert!(s.create_group("Empty", &["ghost"]).is_none());

        s.ungroup(&g1);
        let g3 = s.create_group("Again", &["notes"]).unwrap();
        assert_eq!(g3, "grp-3");
        assert!(matches!(&s.desktop_items()[0], DesktopItem::Group(g) if g.id == "grp-3"));
    }

    #[test]
    fn test_shortcut_operations() {
        let mut s = session();
        s.remove_shortcut_for_app("maps");
        assert_eq!(shortcuts::shortcut_ids(s.desktop_items()), ["finder", "notes", "mail"]);
        s.add_shortcut_for_app("maps").unwrap();
        assert_eq!(s.desktop_items()[0].id(), "maps");
        assert!(s.add_shortcut_for_app("ghost").is_err());

        s.reorder_shortcuts("maps", "mail");
        assert_eq!(shortcuts::shortcut_ids(s.desktop_items()), ["finder", "notes", "mail", "maps"]);

        let group = s.create_group("G", &["finder"]).unwrap();
        s.add_to_group("notes", &group);
        s.rename_group(&group, "Renamed");
        s.remove_from_group("finder", &group);
        assert!(matches!(
            &s.desktop_items()[0],
            DesktopItem::Group(g) if g.label == "Renamed" && g.children.len() == 1
        ));
    }

    #[test]
    fn test_default_layout_clears_key() {
        let mut store = MemoryStore::new();
        store.save(KEY, "stale").unwrap();

        let s = session();
        assert!(s.is_default_layout());
        s.save(&mut store).unwrap();
        assert!(store.get(KEY).is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut s = session();
        let a = s.open("notes", OpenOptions::at(120.0, 140.0)).unwrap();
        let b = s.open("mail", OpenOptions::default()).unwrap();
        let c = s.open("maps", OpenOptions::default()).unwrap();
        s.open_sub_window(a, "Find", None).unwrap();
        s.toggle_maximize(b).unwrap();
        s.minimize(c).unwrap();
        s.focus(a).unwrap();
        s.unpin_app("finder");

        let mut store = MemoryStore::new();
        s.save(&mut store).unwrap();
        assert!(store.get(KEY).is_some());

        let mut restored = session();
        assert!(restored.load(&store).unwrap());
        assert_eq!(restored.windows().count(), 3);
        assert_eq!(restored.focused(), Some(a));

        let wa = restored.window(a).unwrap();
        assert_eq!(wa.position, Vec2::new(120.0, 140.0));
        assert_eq!(wa.size, Size::new(400.0, 300.0));
        assert!(wa.focused);
        assert_eq!(restored.window(b).unwrap().state, WindowState::Maximized);
        assert_eq!(restored.window(c).unwrap().state, WindowState::Minimized);
        assert_eq!(restored.dock().app_ids(), ["notes", "mail", "maps"]);

        // The sub-window was not saved, so its id is free again
        let next = restored.open("finder", OpenOptions::default()).unwrap();
        assert_eq!(next, 4);
        let top = restored.windows().windows_by_z().last().map(|w| w.id);
        assert_eq!(top, Some(next));

        restored.toggle_maximize(b).unwrap();
        assert_eq!(restored.window(b).unwrap().size, Size::new(640.0, 380.0));
    }

    #[test]
    fn test_load_with_nothing_stored() {
        let mut s = session();
        assert!(!s.load(&MemoryStore::new()).unwrap());
        assert!(s.is_default_layout());
    }

    #[test]
    fn test_unreadable_snapshot_keeps_state() {
        let mut store = MemoryStore::new();
        store.save(KEY, "{broken").unwrap();

        let mut s = session();
        let id = s.open("notes", OpenOptions::default()).unwrap();
        assert!(s.load(&store).is_err());
        assert!(s.window(id).is_some());
    }

    #[test]
    fn test_restore_with_exhausted_id_counter() {
        let json = r#"{
            "version": 2,
            "windows": [
                {"id": 18446744073709551615, "appId": "notes", "x": 100, "y": 100, "w": 400, "h": 300, "z": 12},
                {"id": 5, "appId": "mail", "z": 11}
            ],
            "activeId": 18446744073709551615
        }"#;
        let mut s = session();
        s.apply_snapshot(Snapshot::from_json(json).unwrap());

        assert_eq!(s.windows().count(), 2);
        assert_eq!(s.window(1).unwrap().app_id, "mail");
        assert_eq!(s.window(2).unwrap().app_id, "notes");
        assert_eq!(s.focused(), Some(2));

        let next = s.open("finder", OpenOptions::default()).unwrap();
        assert_eq!(next, 3);
        assert_eq!(s.focused(), Some(next));
    }

    #[test]
    fn test_restore_rules() {
        let json = r#"{
            "version": 2,
            "windows": [
                {"id": 7, "appId": "notes", "x": 100, "y": 100, "w": -5, "h": 300, "z": 50},
                {"id": 3, "appId": "ghost", "x": 0, "y": 0, "w": 300, "h": 300, "z": 60},
                {"id": 4, "appId": "mail", "w": 640, "h": 380, "z": 20}
            ],
            "activeId": 3,
            "dockAppIds": ["mail", "ghost"]
        }"#;
        let mut s = session();
        s.apply_snapshot(Snapshot::from_json(json).unwrap());

        assert_eq!(s.windows().count(), 2);
        assert_eq!(s.focused(), None);
        let notes = s.window(7).unwrap();
        assert_eq!(notes.size, Size::new(400.0, 300.0));
        let mail = s.window(4).unwrap();
        assert_eq!(mail.position, Vec2::new(80.0, 120.0));
        assert_eq!(mail.z_index, 11);
        assert_eq!(notes.z_index, 12);
        assert_eq!(s.dock().app_ids(), ["mail"]);
        assert_eq!(s.desktop_items(), shortcuts::default_items(s.apps()).as_slice());

        let next = s.open("finder", OpenOptions::default()).unwrap();
        assert_eq!(next, 8);
    }

    #[test]
    fn test_v1_snapshot_migrates_shortcuts() {
        let json = r#"{"windows":[],"activeId":null,"dockAppIds":["notes"],"shortcuts":["maps","notes"]}"#;
        let mut s = session();
        s.apply_snapshot(Snapshot::from_json(json).unwrap());
        assert_eq!(shortcuts::shortcut_ids(s.desktop_items()), ["maps", "notes"]);
        assert_eq!(s.dock().app_ids(), ["notes"]);
    }

    #[test]
    fn test_reset_stored() {
        let mut s = session();
        s.open("notes", OpenOptions::default()).unwrap();
        s.unpin_app("notes");
        let mut store = MemoryStore::new();
        s.save(&mut store).unwrap();

        s.reset_stored(&mut store).unwrap();
        assert!(store.get(KEY).is_none());
        assert!(s.is_default_layout());
    }
}
