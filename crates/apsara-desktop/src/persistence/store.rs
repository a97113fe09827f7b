//! Key-value storage for layout snapshots

use std::collections::HashMap;

use crate::error::DesktopResult;

/// String storage keyed by name, the shape of browser `localStorage`
pub trait LayoutStore {
    /// Read a value; `Ok(None)` when nothing is stored
    fn load(&self, key: &str) -> DesktopResult<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> DesktopResult<()>;
    fn remove(&mut self, key: &str) -> DesktopResult<()>;
}

/// In-memory store for tests and headless sessions
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LayoutStore for MemoryStore {
    fn load(&self, key: &str) -> DesktopResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> DesktopResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> DesktopResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
