//! Directory tree for panedit.
//!
//! Shows the working directory as a lazily expanded tree, filtered to
//! entries worth editing. Selecting a file yields its absolute path.

mod filter;

pub use filter::is_shown;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use panedit_logger as logger;

/// Emitted when the user picks a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// Absolute path of the chosen file
    FileSelected(PathBuf),
}

/// One visible row of the tree.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub name: String,
    pub depth: usize,
    pub is_dir: bool,
    pub expanded: bool,
}

/// Flattened view of the visible part of a directory tree.
///
/// Directories are read when first expanded and forgotten on collapse.
pub struct FileTree {
    root: PathBuf,
    entries: Vec<TreeEntry>,
    selected: usize,
    scroll_offset: usize,
}

impl FileTree {
    /// Build a tree rooted at `root`, with the top level loaded.
    pub fn new(root: &Path) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("Cannot open directory {}", root.display()))?;
        let entries = read_children(&root, 0)
            .with_context(|| format!("Cannot read directory {}", root.display()))?;
        Ok(Self {
            root,
            entries,
            selected: 0,
            scroll_offset: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Title shown above the tree.
    pub fn title(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&TreeEntry> {
        self.entries.get(self.selected)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Re-read the top level, dropping expansions.
    pub fn reload(&mut self) -> Result<()> {
        self.entries = read_children(&self.root, 0)?;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
        Ok(())
    }

    // ===== Navigation =====

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Enter: toggle a directory, or pick a file.
    pub fn activate(&mut self) -> Option<TreeEvent> {
        let entry = self.entries.get(self.selected)?;
        if entry.is_dir {
            if entry.expanded {
                self.collapse(self.selected);
            } else {
                self.expand(self.selected);
            }
            None
        } else {
            logger::debug(format!("Tree selected {}", entry.path.display()));
            Some(TreeEvent::FileSelected(entry.path.clone()))
        }
    }

    /// Right: expand the selected directory.
    pub fn expand_selected(&mut self) {
        if self
            .selected_entry()
            .is_some_and(|entry| entry.is_dir && !entry.expanded)
        {
            self.expand(self.selected);
        }
    }

    /// Left: collapse the selected directory, or jump to its parent.
    pub fn collapse_selected(&mut self) {
        let Some(entry) = self.entries.get(self.selected) else {
            return;
        };
        if entry.is_dir && entry.expanded {
            self.collapse(self.selected);
            return;
        }
        let depth = entry.depth;
        if depth == 0 {
            return;
        }
        if let Some(parent) = self.entries[..self.selected]
            .iter()
            .rposition(|candidate| candidate.depth + 1 == depth)
        {
            self.selected = parent;
        }
    }

    /// Keep the selection inside a viewport of `height` rows.
    pub fn ensure_selected_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    fn expand(&mut self, index: usize) {
        let entry = &self.entries[index];
        let children = match read_children(&entry.path, entry.depth + 1) {
            Ok(children) => children,
            Err(err) => {
                logger::warn(format!("Cannot expand {}: {}", entry.path.display(), err));
                return;
            }
        };
        self.entries[index].expanded = true;
        self.entries.splice(index + 1..index + 1, children);
    }

    fn collapse(&mut self, index: usize) {
        let depth = self.entries[index].depth;
        let end = self.entries[index + 1..]
            .iter()
            .position(|entry| entry.depth <= depth)
            .map_or(self.entries.len(), |offset| index + 1 + offset);
        self.entries.drain(index + 1..end);
        self.entries[index].expanded = false;
        if self.selected > index && self.selected < end {
            self.selected = index;
        } else if self.selected >= end {
            self.selected -= end - index - 1;
        }
    }
}

/// Shown children of `dir`, directories first, then by name.
///
/// Entries whose metadata cannot be read are skipped.
fn read_children(dir: &Path, depth: usize) -> Result<Vec<TreeEntry>> {
    let mut children: Vec<TreeEntry> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            let is_dir = fs::metadata(&path).ok()?.is_dir();
            if !is_shown(&path, is_dir) {
                return None;
            }
            Some(TreeEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                depth,
                is_dir,
                expanded: false,
            })
        })
        .collect();

    children.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::create_dir(dir.path().join("target")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();
        fs::write(dir.path().join("Makefile"), "all:").unwrap();
        fs::write(dir.path().join("logo.png"), [0u8; 4]).unwrap();
        dir
    }

    fn names(tree: &FileTree) -> Vec<&str> {
        tree.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_top_level_is_filtered_and_sorted() {
        let dir = project();
        let tree = FileTree::new(dir.path()).unwrap();
        assert_eq!(names(&tree), vec!["src", "Makefile", "README.md"]);
    }

    #[test]
    fn test_expand_and_collapse() {
        let dir = project();
        let mut tree = FileTree::new(dir.path()).unwrap();

        assert_eq!(tree.activate(), None);
        assert_eq!(names(&tree), vec!["src", "main.rs", "Makefile", "README.md"]);
        assert_eq!(tree.entries()[1].depth, 1);

        tree.select_next();
        tree.collapse_selected();
        assert_eq!(tree.selected(), 0);

        tree.collapse_selected();
        assert_eq!(names(&tree), vec!["src", "Makefile", "README.md"]);
    }

    #[test]
    fn test_activate_file_yields_absolute_path() {
        let dir = project();
        let mut tree = FileTree::new(dir.path()).unwrap();
        tree.select_last();

        match tree.activate() {
            Some(TreeEvent::FileSelected(path)) => {
                assert!(path.is_absolute());
                assert_eq!(path, dir.path().canonicalize().unwrap().join("README.md"));
            }
            other => panic!("expected file selection, got {:?}", other),
        }
    }

    #[test]
    fn test_collapse_keeps_selection_after_block() {
        let dir = project();
        let mut tree = FileTree::new(dir.path()).unwrap();
        tree.expand_selected();
        tree.select_last();
        assert_eq!(tree.selected_entry().unwrap().name, "README.md");

        tree.collapse(0);
        assert_eq!(tree.selected_entry().unwrap().name, "README.md");
    }

    #[test]
    fn test_ensure_selected_visible() {
        let dir = project();
        let mut tree = FileTree::new(dir.path()).unwrap();
        tree.select_last();
        tree.ensure_selected_visible(2);
        assert_eq!(tree.scroll_offset(), 1);
        tree.select_first();
        tree.ensure_selected_visible(2);
        assert_eq!(tree.scroll_offset(), 0);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(FileTree::new(&dir.path().join("missing")).is_err());
    }
}
