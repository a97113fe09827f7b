//! Pinned applications in the dock

use serde::Serialize;

use crate::app::AppRegistry;

/// Ordered list of app ids pinned to the dock
///
/// Ids are unique and non-empty, and the list never exceeds its capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dock {
    app_ids: Vec<String>,
    #[serde(skip)]
    capacity: usize,
}

impl Dock {
    /// Create a dock from arbitrary ids, normalizing them
    pub fn new<I, S>(ids: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            app_ids: normalize(ids, capacity),
            capacity,
        }
    }

    /// Fresh dock holding the first `initial` apps of the catalogue
    pub fn with_defaults(apps: &AppRegistry, initial: usize, capacity: usize) -> Self {
        Self::new(apps.iter().take(initial).map(|a| a.id.clone()), capacity)
    }

    /// Pinned app ids in display order
    #[inline]
    pub fn app_ids(&self) -> &[String] {
        &self.app_ids
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.app_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.app_ids.is_empty()
    }

    /// Check if an app is pinned
    pub fn contains(&self, app_id: &str) -> bool {
        self.app_ids.iter().any(|id| id == app_id)
    }

    /// Pin an app at the end; returns false if it was already pinned or the dock is full
    pub fn pin(&mut self, app_id: &str) -> bool {
        if app_id.is_empty() || self.contains(app_id) || self.app_ids.len() >= self.capacity {
            return false;
        }
        self.app_ids.push(app_id.to_string());
        true
    }

    /// Unpin an app; returns false if it was not pinned
    pub fn unpin(&mut self, app_id: &str) -> bool {
        let before = self.app_ids.len();
        self.app_ids.retain(|id| id != app_id);
        self.app_ids.len() != before
    }

    /// Replace the whole list
    pub fn set<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.app_ids = normalize(ids, self.capacity);
    }

    /// Drop ids that no longer name a catalogue app
    pub fn retain_known(&mut self, apps: &AppRegistry) {
        self.app_ids.retain(|id| apps.contains(id));
    }
}

fn normalize<I, S>(ids: I, capacity: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        if out.len() >= capacity {
            break;
        }
        let id = id.into();
        if id.is_empty() || out.contains(&id) {
            continue;
        }
        out.push(id);
    }
    out
}
