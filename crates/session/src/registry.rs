//! Bidirectional path/tab bookkeeping.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::tab_id::TabId;

/// Tracks which file each tab shows.
///
/// Paths are compared as given, without normalization. The welcome tab
/// is never registered.
#[derive(Debug, Default)]
pub struct TabRegistry {
    by_path: HashMap<PathBuf, TabId>,
    by_tab: HashMap<TabId, PathBuf>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `tab_id` shows `path`. Stale mappings of either side
    /// are dropped so the two directions stay consistent.
    pub fn register(&mut self, path: PathBuf, tab_id: TabId) {
        if let Some(old_tab) = self.by_path.remove(&path) {
            self.by_tab.remove(&old_tab);
        }
        if let Some(old_path) = self.by_tab.remove(&tab_id) {
            self.by_path.remove(&old_path);
        }
        self.by_path.insert(path.clone(), tab_id.clone());
        self.by_tab.insert(tab_id, path);
    }

    /// Tab currently showing `path`.
    pub fn is_open(&self, path: &Path) -> Option<&TabId> {
        self.by_path.get(path)
    }

    pub fn resolve_path(&self, tab_id: &TabId) -> Option<&Path> {
        self.by_tab.get(tab_id).map(PathBuf::as_path)
    }

    /// Forget `tab_id`, returning the path it showed.
    pub fn unregister(&mut self, tab_id: &TabId) -> Option<PathBuf> {
        let path = self.by_tab.remove(tab_id)?;
        self.by_path.remove(&path);
        Some(path)
    }

    pub fn len(&self) -> usize {
        self.by_tab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tab.is_empty()
    }
}
