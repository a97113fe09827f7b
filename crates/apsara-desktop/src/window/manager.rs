//! Window collection with z-order and focus
//!
//! The collection is copy-on-write: every mutation works on a private draft
//! and, only if it succeeds, replaces the shared `Arc` in one step. Readers
//! holding a [`WindowSnapshot`] keep seeing the collection exactly as it was
//! when they took it.

use std::sync::Arc;

use crate::error::{DesktopError, DesktopResult};
use crate::math::{Rect, Size};
use super::{Window, WindowId, WindowState};

/// Immutable view of the window collection, in opening order
pub type WindowSnapshot = Arc<[Window]>;

/// Everything needed to insert a window; geometry is already validated
#[derive(Clone, Debug)]
pub struct NewWindow {
    pub app_id: String,
    pub title: String,
    pub rect: Rect,
    pub min_size: Size,
    pub parent_id: Option<WindowId>,
}

/// Largest id kept as-is when restoring; also the largest integer a
/// JavaScript number holds exactly
pub const MAX_RESTORED_ID: WindowId = (1 << 53) - 1;

/// Give windows ids `1..=n` in ascending id order, remapping parents and the
/// active id
fn renumber(windows: &mut [Window], active: Option<WindowId>) -> Option<WindowId> {
    let mut old: Vec<WindowId> = windows.iter().map(|w| w.id).collect();
    old.sort_unstable();
    let map = |id: WindowId| old.binary_search(&id).ok().map(|i| i as WindowId + 1);

    for window in windows.iter_mut() {
        window.id = map(window.id).unwrap_or(window.id);
        window.parent_id = window.parent_id.and_then(map);
    }
    active.and_then(map)
}

/// Window manager handling the collection, z-order, and focus
#[derive(Debug)]
pub struct WindowManager {
    windows: WindowSnapshot,
    /// Focused window (None = desktop has focus)
    active: Option<WindowId>,
    /// Next window ID
    next_id: WindowId,
    /// Highest z-index handed out so far
    z_seed: u32,
}

/// Mutable draft of the manager state used inside a transaction
pub(crate) struct Draft {
    pub(crate) windows: Vec<Window>,
    pub(crate) active: Option<WindowId>,
    next_id: WindowId,
    z_seed: u32,
}

impl Draft {
    pub(crate) fn get(&self, id: WindowId) -> DesktopResult<&Window> {
        self.windows
            .iter()
            .find(|w| w.id == id)
            .ok_or(DesktopError::WindowNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: WindowId) -> DesktopResult<&mut Window> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(DesktopError::WindowNotFound(id))
    }

    /// Focus a window and lift it above every other window
    pub(crate) fn raise(&mut self, id: WindowId) -> DesktopResult<()> {
        self.z_seed += 1;
        let z = self.z_seed;
        let window = self.get_mut(id)?;
        window.z_index = z;
        self.active = Some(id);
        Ok(())
    }

    /// Insert a new window on top of the stack, focused, and return its id
    pub(crate) fn insert(&mut self, new: NewWindow) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        self.z_seed += 1;

        self.windows.push(Window {
            id,
            app_id: new.app_id,
            title: new.title,
            position: new.rect.position(),
            size: new.rect.size(),
            min_size: new.min_size,
            z_index: self.z_seed,
            focused: false,
            state: WindowState::Normal,
            restore_rect: None,
            parent_id: new.parent_id,
        });
        self.active = Some(id);
        id
    }

    /// Remove a window together with all of its sub-windows
    pub(crate) fn remove_tree(&mut self, id: WindowId) -> DesktopResult<Vec<WindowId>> {
        self.get(id)?;
        let mut removed = vec![id];
        let mut cursor = 0;
        while cursor < removed.len() {
            let parent = removed[cursor];
            removed.extend(
                self.windows
                    .iter()
                    .filter(|w| w.parent_id == Some(parent))
                    .map(|w| w.id),
            );
            cursor += 1;
        }
        self.windows.retain(|w| !removed.contains(&w.id));
        if self.active.is_some_and(|a| removed.contains(&a)) {
            self.transfer_focus();
        }
        Ok(removed)
    }

    /// Hand focus to the topmost visible window, or to the desktop
    pub(crate) fn transfer_focus(&mut self) {
        let next = self
            .windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
            .map(|w| w.id);
        match next {
            Some(id) => {
                // The id was just read from the draft
                let _ = self.raise(id);
            }
            None => self.active = None,
        }
    }
}

impl WindowManager {
    /// Create an empty manager; the first window gets `initial_z + 1`
    pub fn new(initial_z: u32) -> Self {
        Self {
            windows: Arc::from(Vec::new()),
            active: None,
            next_id: 1,
            z_seed: initial_z,
        }
    }

    /// Rebuild a manager from restored windows.
    ///
    /// Z-indices are renumbered in their existing order so they are unique,
    /// and the id counter continues after the highest restored id. Ids past
    /// [`MAX_RESTORED_ID`] are renumbered from 1 in their existing order.
    pub fn restore(mut windows: Vec<Window>, active: Option<WindowId>, initial_z: u32) -> Self {
        let mut order: Vec<usize> = (0..windows.len()).collect();
        order.sort_by_key(|&i| windows[i].z_index);
        let mut z_seed = initial_z;
        for i in order {
            z_seed += 1;
            windows[i].z_index = z_seed;
        }

        let mut active = active;
        let highest = windows.iter().map(|w| w.id).max().unwrap_or(0);
        if highest > MAX_RESTORED_ID {
            tracing::warn!(highest, "restored window ids out of range, renumbering");
            active = renumber(&mut windows, active);
        }
        let next_id = windows.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let active = active.filter(|id| windows.iter().any(|w| w.id == *id && w.is_visible()));

        let mut manager = Self {
            windows: Arc::from(Vec::new()),
            active: None,
            next_id,
            z_seed,
        };
        let mut draft = manager.draft();
        draft.windows = windows;
        if let Some(id) = active {
            // Filtered against the restored windows above
            let _ = draft.raise(id);
        }
        manager.commit(draft);
        manager
    }

    /// Run a mutation against a draft and commit it only on success
    pub(crate) fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut Draft) -> DesktopResult<T>,
    ) -> DesktopResult<T> {
        let mut draft = self.draft();
        let out = f(&mut draft)?;
        self.commit(draft);
        Ok(out)
    }

    fn draft(&self) -> Draft {
        Draft {
            windows: self.windows.to_vec(),
            active: self.active,
            next_id: self.next_id,
            z_seed: self.z_seed,
        }
    }

    /// Publish a draft as the new collection in one replacement
    fn commit(&mut self, mut draft: Draft) {
        for window in &mut draft.windows {
            window.focused = draft.active == Some(window.id);
        }
        self.windows = Arc::from(draft.windows);
        self.active = draft.active;
        self.next_id = draft.next_id;
        self.z_seed = draft.z_seed;
    }

    /// Current collection; cheap to clone and never mutated in place
    #[inline]
    pub fn snapshot(&self) -> WindowSnapshot {
        Arc::clone(&self.windows)
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Get a window by ID, failing with [`DesktopError::WindowNotFound`]
    pub fn require(&self, id: WindowId) -> DesktopResult<&Window> {
        self.get(id).ok_or(DesktopError::WindowNotFound(id))
    }

    /// Get the currently focused window ID
    #[inline]
    pub fn focused(&self) -> Option<WindowId> {
        self.active
    }

    /// All windows in opening order
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    /// Get windows sorted by z-order (back to front)
    pub fn windows_by_z(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.windows.iter().collect();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    /// Highest z-index handed out so far
    #[inline]
    pub fn z_seed(&self) -> u32 {
        self.z_seed
    }

    /// Get the number of windows
    #[inline]
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Check if no windows are open
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Insert a window whose geometry the caller has already constrained
    pub fn create(&mut self, new: NewWindow) -> WindowId {
        let mut draft = self.draft();
        let id = draft.insert(new);
        self.commit(draft);
        id
    }

    /// Focus a window (brings to top)
    pub fn focus(&mut self, id: WindowId) -> DesktopResult<()> {
        self.transact(|draft| {
            if !draft.get(id)?.is_visible() {
                return Err(DesktopError::InvalidOperation {
                    op: "focus",
                    reason: "window is minimized",
                });
            }
            draft.raise(id)
        })
    }

    /// Give focus to the desktop itself
    pub fn blur(&mut self) {
        let mut draft = self.draft();
        draft.active = None;
        self.commit(draft);
    }

    /// Close a window and its sub-windows, returning every removed id
    pub fn close(&mut self, id: WindowId) -> DesktopResult<Vec<WindowId>> {
        self.transact(|draft| draft.remove_tree(id))
    }

    /// Remove every window
    pub fn clear(&mut self) {
        let mut draft = self.draft();
        draft.windows.clear();
        draft.active = None;
        self.commit(draft);
    }

    /// Remove every window and restart z-ordering at `initial_z`.
    /// Ids keep counting so none is handed out twice.
    pub fn reset(&mut self, initial_z: u32) {
        self.clear();
        self.z_seed = initial_z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn new_window(app_id: &str) -> NewWindow {
        NewWindow {
            app_id: app_id.to_string(),
            title: app_id.to_string(),
            rect: Rect::new(80.0, 120.0, 640.0, 380.0),
            min_size: Size::new(200.0, 150.0),
            parent_id: None,
        }
    }

    #[test]
    fn test_window_creation() {
        let mut wm = WindowManager::new(10);
        let id = wm.create(new_window("notes"));

        let window = wm.get(id).unwrap();
        assert_eq!(window.z_index, 11);
        assert!(window.focused);
        assert_eq!(wm.focused(), Some(id));
        assert_eq!(wm.count(), 1);
    }

    #[test]
    fn test_window_focus_raises() {
        let mut wm = WindowManager::new(10);
        let id1 = wm.create(new_window("notes"));
        let id2 = wm.create(new_window("mail"));
        assert_eq!(wm.focused(), Some(id2));

        wm.focus(id1).unwrap();
        assert_eq!(wm.focused(), Some(id1));
        assert!(wm.get(id1).unwrap().z_index > wm.get(id2).unwrap().z_index);
        assert!(!wm.get(id2).unwrap().focused);
    }

    #[test]
    fn test_focus_unknown_window() {
        let mut wm = WindowManager::new(10);
        assert_eq!(wm.focus(99), Err(DesktopError::WindowNotFound(99)));
    }

    #[test]
    fn test_close_transfers_focus() {
        let mut wm = WindowManager::new(10);
        let id1 = wm.create(new_window("a"));
        let id2 = wm.create(new_window("b"));
        let id3 = wm.create(new_window("c"));
        wm.focus(id1).unwrap();

        wm.close(id1).unwrap();
        assert_eq!(wm.focused(), Some(id3));

        wm.close(id3).unwrap();
        assert_eq!(wm.focused(), Some(id2));

        wm.close(id2).unwrap();
        assert_eq!(wm.focused(), None);
        assert!(wm.is_empty());
    }

    #[test]
    fn test_close_removes_sub_windows() {
        let mut wm = WindowManager::new(10);
        let parent = wm.create(new_window("finder"));
        let child = wm.create(NewWindow {
            parent_id: Some(parent),
            ..new_window("finder")
        });
        let grandchild = wm.create(NewWindow {
            parent_id: Some(child),
            ..new_window("finder")
        });
        let other = wm.create(new_window("notes"));

        let removed = wm.close(parent).unwrap();
        assert_eq!(removed, vec![parent, child, grandchild]);
        assert_eq!(wm.count(), 1);
        assert!(wm.get(other).is_some());
    }

    #[test]
    fn test_failed_transaction_keeps_snapshot() {
        let mut wm = WindowManager::new(10);
        wm.create(new_window("notes"));
        let before = wm.snapshot();
        let seed = wm.z_seed();

        assert!(wm.close(42).is_err());
        assert!(Arc::ptr_eq(&before, &wm.snapshot()));
        assert_eq!(wm.z_seed(), seed);
    }

    #[test]
    fn test_reset_keeps_id_counter() {
        let mut wm = WindowManager::new(10);
        let first = wm.create(new_window("notes"));
        wm.focus(first).unwrap();

        wm.reset(10);
        assert!(wm.is_empty());
        assert_eq!(wm.focused(), None);

        let next = wm.create(new_window("notes"));
        assert!(next > first);
        assert_eq!(wm.get(next).unwrap().z_index, 11);
    }

    #[test]
    fn test_snapshot_isolated_from_later_mutation() {
        let mut wm = WindowManager::new(10);
        let id = wm.create(new_window("notes"));
        let before = wm.snapshot();

        wm.transact(|draft| {
            draft.get_mut(id)?.position = Vec2::new(300.0, 300.0);
            Ok(())
        })
        .unwrap();

        assert_eq!(before[0].position, Vec2::new(80.0, 120.0));
        assert_eq!(wm.get(id).unwrap().position, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_restore_renumbers_z() {
        let mut wm = WindowManager::new(10);
        let a = wm.create(new_window("a"));
        let b = wm.create(new_window("b"));
        let mut windows = wm.snapshot().to_vec();
        for w in &mut windows {
            w.z_index = 5;
        }

        let restored = WindowManager::restore(windows, Some(a), 10);
        let za = restored.get(a).unwrap().z_index;
        let zb = restored.get(b).unwrap().z_index;
        assert_ne!(za, zb);
        assert_eq!(restored.focused(), Some(a));
        assert!(za > zb);

        let mut restored = restored;
        let c = restored.create(new_window("c"));
        assert_eq!(c, 3);
    }

    #[test]
    fn test_restore_renumbers_ids_past_limit() {
        let mut wm = WindowManager::new(10);
        wm.create(new_window("a"));
        wm.create(new_window("b"));
        let mut windows = wm.snapshot().to_vec();
        windows[0].id = WindowId::MAX;
        windows[1].id = 40;
        windows[1].parent_id = Some(WindowId::MAX);

        let mut restored = WindowManager::restore(windows, Some(WindowId::MAX), 10);
        assert_eq!(restored.count(), 2);
        assert_eq!(restored.focused(), Some(2));
        assert_eq!(restored.get(1).unwrap().app_id, "b");
        assert_eq!(restored.get(1).unwrap().parent_id, Some(2));
        assert_eq!(restored.get(2).unwrap().app_id, "a");

        let next = restored.create(new_window("c"));
        assert_eq!(next, 3);
    }

    #[test]
    fn test_blur_and_clear_publish_new_snapshot() {
        let mut wm = WindowManager::new(10);
        let id = wm.create(new_window("a"));
        let before = wm.snapshot();

        wm.blur();
        assert_eq!(wm.focused(), None);
        assert!(!wm.get(id).unwrap().focused);
        assert!(before[0].focused);

        wm.clear();
        assert!(wm.is_empty());
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_windows_by_z() {
        let mut wm = WindowManager::new(10);
        let id1 = wm.create(new_window("a"));
        let id2 = wm.create(new_window("b"));
        wm.focus(id1).unwrap();

        let order: Vec<WindowId> = wm.windows_by_z().iter().map(|w| w.id).collect();
        assert_eq!(order, vec![id2, id1]);
    }
}
