//! Desktop shortcuts and shortcut groups
//!
//! All operations are pure list transforms: they take the current items and
//! return the next list, leaving the input untouched. Operations that name an
//! item or group that does not exist return the list unchanged.

use serde::{Deserialize, Serialize};

use crate::app::{AppDef, AppRegistry};

/// Desktop icon that launches an app
///
/// Stored layouts may omit `app_id` and `label`; [`sanitize`] fills them from
/// the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    pub id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub label: String,
}

impl Shortcut {
    /// Shortcut for an app, keyed by the app id
    pub fn for_app(app: &AppDef) -> Self {
        Self {
            id: app.id.clone(),
            app_id: app.id.clone(),
            label: app.name.clone(),
        }
    }
}

/// Named folder of shortcuts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub children: Vec<Shortcut>,
}

/// Top-level item on the desktop
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DesktopItem {
    App(Shortcut),
    Group(Group),
}

impl DesktopItem {
    pub fn id(&self) -> &str {
        match self {
            DesktopItem::App(s) => &s.id,
            DesktopItem::Group(g) => &g.id,
        }
    }

    /// Check if this item (or one of its children) launches `app_id`
    pub fn launches(&self, app_id: &str) -> bool {
        match self {
            DesktopItem::App(s) => s.app_id == app_id,
            DesktopItem::Group(g) => g.children.iter().any(|c| c.app_id == app_id),
        }
    }
}

const DEFAULT_GROUP_LABEL: &str = "Group";

/// One shortcut per catalogue app, in catalogue order
pub fn default_items(apps: &AppRegistry) -> Vec<DesktopItem> {
    apps.iter().map(|a| DesktopItem::App(Shortcut::for_app(a))).collect()
}

/// Build items from a flat list of app ids, the layout older snapshots stored
pub fn from_app_ids(ids: &[String], apps: &AppRegistry) -> Vec<DesktopItem> {
    let mut items: Vec<DesktopItem> = Vec::new();
    for id in ids {
        if items.iter().any(|i| i.id() == id) {
            continue;
        }
        if let Some(app) = apps.get(id) {
            items.push(DesktopItem::App(Shortcut::for_app(app)));
        }
    }
    if items.is_empty() {
        default_items(apps)
    } else {
        items
    }
}

/// Drop shortcuts for unknown apps, duplicate ids, and groups left empty.
/// Falls back to the defaults when nothing survives.
pub fn sanitize(items: Vec<DesktopItem>, apps: &AppRegistry) -> Vec<DesktopItem> {
    let mut out: Vec<DesktopItem> = Vec::new();
    for item in items {
        if out.iter().any(|i| i.id() == item.id()) {
            continue;
        }
        match item {
            DesktopItem::App(s) => {
                if let Some(s) = resolve(s, apps) {
                    out.push(DesktopItem::App(s));
                }
            }
            DesktopItem::Group(mut g) => {
                let mut children: Vec<Shortcut> = Vec::new();
                for child in g.children {
                    if children.iter().any(|c| c.id == child.id) {
                        continue;
                    }
                    if let Some(child) = resolve(child, apps) {
                        children.push(child);
                    }
                }
                if !children.is_empty() {
                    g.children = children;
                    out.push(DesktopItem::Group(g));
                }
            }
        }
    }
    if out.is_empty() {
        default_items(apps)
    } else {
        out
    }
}

fn resolve(mut shortcut: Shortcut, apps: &AppRegistry) -> Option<Shortcut> {
    if shortcut.app_id.is_empty() {
        shortcut.app_id = shortcut.id.clone();
    }
    let app = apps.get(&shortcut.app_id)?;
    if shortcut.label.is_empty() {
        shortcut.label = app.name.clone();
    }
    Some(shortcut)
}

/// Flattened shortcut ids in display order
pub fn shortcut_ids(items: &[DesktopItem]) -> Vec<&str> {
    let mut ids = Vec::new();
    for item in items {
        match item {
            DesktopItem::App(s) => ids.push(s.id.as_str()),
            DesktopItem::Group(g) => ids.extend(g.children.iter().map(|c| c.id.as_str())),
        }
    }
    ids
}

/// Move `active_id` to the position of `over_id`
pub fn reorder(items: &[DesktopItem], active_id: &str, over_id: &str) -> Vec<DesktopItem> {
    let mut next = items.to_vec();
    if active_id == over_id {
        return next;
    }
    let from = items.iter().position(|i| i.id() == active_id);
    let to = items.iter().position(|i| i.id() == over_id);
    if let (Some(from), Some(to)) = (from, to) {
        let item = next.remove(from);
        next.insert(to, item);
    }
    next
}

/// Move a top-level shortcut into a group
pub fn add_to_group(items: &[DesktopItem], item_id: &str, group_id: &str) -> Vec<DesktopItem> {
    let group_exists = items
        .iter()
        .any(|i| matches!(i, DesktopItem::Group(g) if g.id == group_id));
    let moved = items.iter().find_map(|i| match i {
        DesktopItem::App(s) if s.id == item_id => Some(s.clone()),
        _ => None,
    });
    let Some(moved) = moved.filter(|_| group_exists) else {
        return items.to_vec();
    };

    items
        .iter()
        .filter(|i| i.id() != item_id || matches!(i, DesktopItem::Group(_)))
        .cloned()
        .map(|item| match item {
            DesktopItem::Group(mut g) if g.id == group_id => {
                if !g.children.iter().any(|c| c.id == moved.id) {
                    g.children.push(moved.clone());
                }
                DesktopItem::Group(g)
            }
            other => other,
        })
        .collect()
}

/// Gather top-level shortcuts into a new group placed first on the desktop
pub fn create_group(
    items: &[DesktopItem],
    group_id: &str,
    label: &str,
    item_ids: &[&str],
) -> Vec<DesktopItem> {
    let mut children = Vec::new();
    let mut remaining = Vec::new();
    for item in items {
        match item {
            DesktopItem::App(s) if item_ids.contains(&s.id.as_str()) => children.push(s.clone()),
            other => remaining.push(other.clone()),
        }
    }
    if children.is_empty() {
        return items.to_vec();
    }

    let label = if label.is_empty() { DEFAULT_GROUP_LABEL } else { label };
    let mut next = Vec::with_capacity(remaining.len() + 1);
    next.push(DesktopItem::Group(Group {
        id: group_id.to_string(),
        label: label.to_string(),
        children,
    }));
    next.extend(remaining);
    next
}

/// Take a shortcut out of a group and append it to the desktop.
/// A group left empty disappears.
pub fn remove_from_group(items: &[DesktopItem], item_id: &str, group_id: &str) -> Vec<DesktopItem> {
    let mut next = Vec::with_capacity(items.len() + 1);
    let mut removed = None;
    for item in items {
        match item {
            DesktopItem::Group(g) if g.id == group_id => {
                let mut g = g.clone();
                if let Some(pos) = g.children.iter().position(|c| c.id == item_id) {
                    removed = Some(g.children.remove(pos));
                }
                if !g.children.is_empty() {
                    next.push(DesktopItem::Group(g));
                }
            }
            other => next.push(other.clone()),
        }
    }
    match removed {
        Some(shortcut) => {
            next.push(DesktopItem::App(shortcut));
            next
        }
        None => items.to_vec(),
    }
}

/// Replace a group with its children, in place
pub fn ungroup(items: &[DesktopItem], group_id: &str) -> Vec<DesktopItem> {
    let mut next = Vec::with_capacity(items.len());
    for item in items {
        match item {
            DesktopItem::Group(g) if g.id == group_id => {
                next.extend(g.children.iter().cloned().map(DesktopItem::App));
            }
            other => next.push(other.clone()),
        }
    }
    next
}

/// Rename a group; an empty label keeps the old one
pub fn rename_group(items: &[DesktopItem], group_id: &str, label: &str) -> Vec<DesktopItem> {
    items
        .iter()
        .cloned()
        .map(|item| match item {
            DesktopItem::Group(mut g) if g.id == group_id && !label.is_empty() => {
                g.label = label.to_string();
                DesktopItem::Group(g)
            }
            other => other,
        })
        .collect()
}

/// Put a shortcut for `app` first on the desktop unless one already exists
pub fn add_for_app(items: &[DesktopItem], app: &AppDef) -> Vec<DesktopItem> {
    if items.iter().any(|i| i.launches(&app.id)) {
        return items.to_vec();
    }
    let mut next = Vec::with_capacity(items.len() + 1);
    next.push(DesktopItem::App(Shortcut::for_app(app)));
    next.extend_from_slice(items);
    next
}

/// Remove every shortcut for an app, including inside groups
pub fn remove_for_app(items: &[DesktopItem], app_id: &str) -> Vec<DesktopItem> {
    let mut next = Vec::with_capacity(items.len());
    for item in items {
        match item {
            DesktopItem::App(s) if s.app_id == app_id => {}
            DesktopItem::Group(g) => {
                let children: Vec<Shortcut> =
                    g.children.iter().filter(|c| c.app_id != app_id).cloned().collect();
                if !children.is_empty() {
                    next.push(DesktopItem::Group(Group {
                        children,
                        ..g.clone()
                    }));
                }
            }
            other => next.push(other.clone()),
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apps() -> AppRegistry {
        AppRegistry::from_apps([
            AppDef::new("finder", "Finder"),
            AppDef::new("notes", "Notes"),
            AppDef::new("mail", "Mail"),
            AppDef::new("maps", "Maps"),
        ])
        .unwrap()
    }

    fn ids(items: &[DesktopItem]) -> Vec<&str> {
        items.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_default_items() {
        let items = default_items(&apps());
        assert_eq!(ids(&items), ["finder", "notes", "mail", "maps"]);
    }

    #[test]
    fn test_reorder() {
        let items = default_items(&apps());
        assert_eq!(ids(&reorder(&items, "maps", "notes")), ["finder", "maps", "notes", "mail"]);
        assert_eq!(ids(&reorder(&items, "finder", "mail")), ["notes", "mail", "finder", "maps"]);
        assert_eq!(reorder(&items, "ghost", "mail"), items);
    }

    #[test]
    fn test_group_lifecycle() {
        let items = default_items(&apps());
        let items = create_group(&items, "grp-1", "", &["mail", "maps"]);
        assert_eq!(ids(&items), ["grp-1", "finder", "notes"]);
        match &items[0] {
            DesktopItem::Group(g) => {
                assert_eq!(g.label, "Group");
                assert_eq!(g.children.len(), 2);
            }
            _ => panic!("expected group"),
        }

        let items = add_to_group(&items, "notes", "grp-1");
        assert_eq!(ids(&items), ["grp-1", "finder"]);
        assert_eq!(shortcut_ids(&items), ["mail", "maps", "notes", "finder"]);

        let items = rename_group(&items, "grp-1", "Work");
        assert!(matches!(&items[0], DesktopItem::Group(g) if g.label == "Work"));
        let same = rename_group(&items, "grp-1", "");
        assert_eq!(same, items);

        let items = remove_from_group(&items, "mail", "grp-1");
        assert_eq!(ids(&items), ["grp-1", "finder", "mail"]);

        let items = ungroup(&items, "grp-1");
        assert_eq!(ids(&items), ["maps", "notes", "finder", "mail"]);
    }

    #[test]
    fn test_add_to_missing_group_keeps_item() {
        let items = default_items(&apps());
        assert_eq!(add_to_group(&items, "notes", "grp-404"), items);
    }

    #[test]
    fn test_create_group_without_matches_is_noop() {
        let items = default_items(&apps());
        assert_eq!(create_group(&items, "grp-1", "X", &["ghost"]), items);
    }

    #[test]
    fn test_removing_last_child_drops_group() {
        let items = create_group(&default_items(&apps()), "grp-1", "G", &["mail"]);
        let items = remove_from_group(&items, "mail", "grp-1");
        assert_eq!(ids(&items), ["finder", "notes", "maps", "mail"]);
    }

    #[test]
    fn test_add_and_remove_for_app() {
        let registry = apps();
        let items = remove_for_app(&default_items(&registry), "notes");
        assert_eq!(ids(&items), ["finder", "mail", "maps"]);

        let notes = registry.get("notes").unwrap();
        let items = add_for_app(&items, notes);
        assert_eq!(ids(&items), ["notes", "finder", "mail", "maps"]);
        assert_eq!(add_for_app(&items, notes), items);

        let grouped = create_group(&items, "grp-1", "G", &["mail"]);
        let cleared = remove_for_app(&grouped, "mail");
        assert_eq!(ids(&cleared), ["notes", "finder", "maps"]);
    }

    #[test]
    fn test_from_app_ids() {
        let registry = apps();
        let ids_in = vec!["mail".to_string(), "ghost".to_string(), "mail".to_string()];
        assert_eq!(ids(&from_app_ids(&ids_in, &registry)), ["mail"]);
        assert_eq!(from_app_ids(&[], &registry), default_items(&registry));
    }

    #[test]
    fn test_sanitize() {
        let registry = apps();
        let items = vec![
            DesktopItem::App(Shortcut { id: "x".into(), app_id: "ghost".into(), label: "X".into() }),
            DesktopItem::Group(Group { id: "g".into(), label: "G".into(), children: vec![] }),
            DesktopItem::App(Shortcut::for_app(registry.get("maps").unwrap())),
            DesktopItem::App(Shortcut::for_app(registry.get("maps").unwrap())),
        ];
        assert_eq!(ids(&sanitize(items, &registry)), ["maps"]);
        assert_eq!(sanitize(vec![], &registry), default_items(&registry));
    }

    #[test]
    fn test_sanitize_fills_sparse_entries() {
        let items: Vec<DesktopItem> = serde_json::from_str(r#"[{"type":"app","id":"notes"}]"#).unwrap();
        let items = sanitize(items, &apps());
        assert_eq!(
            items,
            [DesktopItem::App(Shortcut { id: "notes".into(), app_id: "notes".into(), label: "Notes".into() })]
        );
    }

    #[test]
    fn test_json_shape() {
        let item = DesktopItem::App(Shortcut { id: "a".into(), app_id: "a".into(), label: "A".into() });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""type":"app""#));
        let back: DesktopItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
