//! Session controller: opening, saving and closing tabs.

use std::path::{Path, PathBuf};

use panedit_buffer::TextSurface;
use panedit_config::{Config, LanguageMap};
use panedit_logger as logger;

use crate::cache::ContentCache;
use crate::dual_view::{DualView, ViewMode};
use crate::error::SessionError;
use crate::loader::{self, LoadError};
use crate::registry::TabRegistry;
use crate::tab::{Tab, TabContent};
use crate::tab_id::TabId;
use crate::display_name;

/// Language kinds shown with a raw/rendered pair.
const MARKUP_KINDS: &[&str] = &["markdown"];

/// Limits and editor defaults applied to every opened file.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Files larger than this many bytes are refused
    pub max_file_size: u64,
    pub cache_capacity: usize,
    pub auto_close_pairs: bool,
    pub tab_size: usize,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes(),
            cache_capacity: config.editor.cache_capacity,
            auto_close_pairs: config.editor.auto_close_pairs,
            tab_size: config.editor.tab_size,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of a successful open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The file already had a tab, which is now active
    Activated(TabId),
    /// A new tab was created
    Opened { tab_id: TabId, from_cache: bool },
}

impl OpenOutcome {
    pub fn tab_id(&self) -> &TabId {
        match self {
            OpenOutcome::Activated(tab_id) => tab_id,
            OpenOutcome::Opened { tab_id, .. } => tab_id,
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub path: PathBuf,
    pub display_name: String,
}

/// Result of a successful close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseOutcome {
    pub tab_id: TabId,
    pub path: Option<PathBuf>,
}

/// Owns the tab strip, the content cache and the path registry.
///
/// The strip always holds at least one tab; the welcome tab sits at
/// index 0 and cannot be closed.
pub struct SessionController {
    settings: SessionSettings,
    languages: LanguageMap,
    cache: ContentCache,
    registry: TabRegistry,
    tabs: Vec<Tab>,
    active: usize,
    view_mode: ViewMode,
}

impl SessionController {
    pub fn new(settings: SessionSettings, languages: LanguageMap) -> Self {
        Self {
            cache: ContentCache::new(settings.cache_capacity),
            settings,
            languages,
            registry: TabRegistry::new(),
            tabs: vec![Tab::welcome()],
            active: 0,
            view_mode: ViewMode::default(),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn set_language_map(&mut self, languages: LanguageMap) {
        self.languages = languages;
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    // ===== Tab strip =====

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_tab_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active]
    }

    /// Surface that receives keystrokes, if the active tab is editable
    /// under the current view mode.
    pub fn active_surface_mut(&mut self) -> Option<&mut TextSurface> {
        let mode = self.view_mode;
        self.tabs[self.active].active_surface_mut(mode)
    }

    /// Make the tab with `tab_id` active. Returns false if it is unknown.
    pub fn activate(&mut self, tab_id: &TabId) -> bool {
        match self.tabs.iter().position(|tab| tab.id() == tab_id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn next_tab(&mut self) {
        self.active = (self.active + 1) % self.tabs.len();
    }

    pub fn prev_tab(&mut self) {
        self.active = if self.active == 0 {
            self.tabs.len() - 1
        } else {
            self.active - 1
        };
    }

    // ===== View mode =====

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Flip between raw editing and rendered view for all markup tabs.
    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        logger::debug(format!("View mode: {:?}", self.view_mode));
        self.view_mode
    }

    // ===== Operations =====

    /// Open `path` in a tab, or activate the tab already showing it.
    ///
    /// Checks in order: existing tab, size limit, cache, disk. Nothing is
    /// cached and no tab is created when any step fails.
    pub fn open(&mut self, path: &Path) -> Result<OpenOutcome, SessionError> {
        if let Some(tab_id) = self.registry.is_open(path).cloned() {
            self.activate(&tab_id);
            logger::debug(format!("Activated existing tab for {}", path.display()));
            return Ok(OpenOutcome::Activated(tab_id));
        }

        let metadata = std::fs::metadata(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() > self.settings.max_file_size {
            logger::warn(format!(
                "Refused {} ({} bytes)",
                path.display(),
                metadata.len()
            ));
            return Err(SessionError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: self.settings.max_file_size,
            });
        }

        let (text, from_cache) = match self.cache.get(path) {
            Some(cached) => (cached.to_string(), true),
            None => {
                let decoded = loader::load(path).map_err(|err| match err {
                    LoadError::BinaryOrUndecodable => SessionError::BinaryOrUndecodable {
                        path: path.to_path_buf(),
                    },
                    LoadError::Io(source) => SessionError::Io {
                        path: path.to_path_buf(),
                        source,
                    },
                })?;
                logger::debug(format!(
                    "Loaded {} as {}",
                    path.display(),
                    decoded.encoding.name()
                ));
                (decoded.text, false)
            }
        };

        if !from_cache {
            if let Some(evicted) = self.cache.put(path.to_path_buf(), text.clone()) {
                logger::debug(format!("Evicted {} from cache", evicted.display()));
            }
        }

        let title = display_name(path);
        let kind = self.languages.kind_for_path(path).map(str::to_string);
        let surface = TextSurface::from_text(&text)
            .with_auto_close_pairs(self.settings.auto_close_pairs)
            .with_tab_size(self.settings.tab_size);
        let content = match kind.as_deref() {
            Some(kind) if MARKUP_KINDS.contains(&kind) => {
                TabContent::DualView(DualView::new(surface))
            }
            _ => TabContent::Plain(surface),
        };

        let tab_id = TabId::allocate(&title);
        self.tabs.push(Tab::new(tab_id.clone(), title, kind, content));
        self.active = self.tabs.len() - 1;
        self.registry.register(path.to_path_buf(), tab_id.clone());

        logger::info(format!("Opened {} as {}", path.display(), tab_id));
        Ok(OpenOutcome::Opened { tab_id, from_cache })
    }

    /// Write the active tab to its file.
    ///
    /// On failure nothing changes in memory. On success the cache holds
    /// the saved text and a rendered face is rebuilt from it.
    pub fn save(&mut self) -> Result<SaveOutcome, SessionError> {
        let tab = &self.tabs[self.active];
        let text = tab.editable_text().ok_or(SessionError::NothingToSave)?;
        let path = self
            .registry
            .resolve_path(tab.id())
            .map(Path::to_path_buf)
            .ok_or_else(|| SessionError::UnresolvablePath {
                tab_id: tab.id().clone(),
            })?;

        if let Err(source) = std::fs::write(&path, text.as_bytes()) {
            logger::error(format!("Failed to save {}: {}", path.display(), source));
            return Err(SessionError::SaveFailed { path, source });
        }

        self.cache.put(path.clone(), text.clone());
        match self.tabs[self.active].content_mut() {
            TabContent::Plain(surface) => surface.mark_saved(),
            TabContent::DualView(view) => {
                view.raw_mut().mark_saved();
                view.update(&text);
            }
            TabContent::Welcome => {}
        }

        logger::info(format!("Saved {}", path.display()));
        Ok(SaveOutcome {
            display_name: display_name(&path),
            path,
        })
    }

    /// Periodic save. Does nothing while the welcome tab is active.
    pub fn auto_save(&mut self) -> Option<Result<SaveOutcome, SessionError>> {
        if self.active_tab().is_welcome() {
            return None;
        }
        let result = self.save();
        if let Err(err) = &result {
            logger::warn(format!("Auto-save failed: {}", err));
        }
        Some(result)
    }

    /// Close the active tab and forget its cached content.
    pub fn close_active(&mut self) -> Result<CloseOutcome, SessionError> {
        if self.tabs.len() <= 1 {
            return Err(SessionError::CloseRejected { what: "last tab" });
        }
        if self.active_tab().is_welcome() {
            return Err(SessionError::CloseRejected { what: "welcome tab" });
        }

        let tab_id = self.active_tab().id().clone();
        let path = self.registry.unregister(&tab_id);
        if let Some(path) = &path {
            self.cache.remove(path);
        }
        self.tabs.remove(self.active);
        if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }

        logger::info(format!("Closed tab {}", tab_id));
        Ok(CloseOutcome { tab_id, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn controller() -> SessionController {
        let languages: LanguageMap = [(".md", "markdown"), (".rs", "rust")]
            .into_iter()
            .collect();
        SessionController::new(SessionSettings::default(), languages)
    }

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_starts_with_welcome_tab() {
        let session = controller();
        assert_eq!(session.tab_count(), 1);
        assert!(session.active_tab().is_welcome());
        assert_eq!(session.active_tab().id().as_str(), "welcome_tab");
    }

    #[test]
    fn test_open_creates_and_caches() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "main.rs", b"fn main() {}\n");
        let mut session = controller();

        let outcome = session.open(&path).unwrap();
        assert!(matches!(outcome, OpenOutcome::Opened { from_cache: false, .. }));
        assert_eq!(session.tab_count(), 2);
        assert_eq!(session.active_index(), 1);
        assert_eq!(session.active_tab().title(), "main.rs");
        assert_eq!(session.active_tab().kind(), Some("rust"));
        assert!(matches!(session.active_tab().content(), TabContent::Plain(_)));
        assert_eq!(session.cache().get(&path), Some("fn main() {}\n"));
        assert_eq!(session.registry().is_open(&path), Some(outcome.tab_id()));
    }

    #[test]
    fn test_open_twice_activates_existing_tab() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"a");
        let mut session = controller();

        let first = session.open(&path).unwrap();
        session.prev_tab();
        std::fs::remove_file(&path).unwrap();
        let second = session.open(&path).unwrap();

        assert_eq!(second, OpenOutcome::Activated(first.tab_id().clone()));
        assert_eq!(session.tab_count(), 2);
        assert_eq!(session.active_index(), 1);
    }

    #[test]
    fn test_open_uses_cached_content() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"on disk");
        let mut session = controller();
        session.cache.put(path.clone(), "cached".to_string());

        let outcome = session.open(&path).unwrap();
        assert!(matches!(outcome, OpenOutcome::Opened { from_cache: true, .. }));
        assert_eq!(session.active_tab().editable_text().as_deref(), Some("cached"));
    }

    #[test]
    fn test_open_refuses_large_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "big.log", &[b'x'; 64]);
        let settings = SessionSettings {
            max_file_size: 16,
            ..SessionSettings::default()
        };
        let mut session = SessionController::new(settings, LanguageMap::default());

        let err = session.open(&path).unwrap_err();
        assert!(matches!(err, SessionError::FileTooLarge { size: 64, limit: 16, .. }));
        assert_eq!(session.tab_count(), 1);
        assert!(session.cache().is_empty());
    }

    #[test]
    fn test_open_binary_file_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "image.png", b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR");
        let mut session = controller();

        let err = session.open(&path).unwrap_err();
        assert!(matches!(err, SessionError::BinaryOrUndecodable { .. }));
        assert_eq!(session.tab_count(), 1);
        assert!(session.cache().is_empty());
        assert!(session.registry().is_empty());
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut session = controller();
        let err = session.open(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn test_open_windows_1252_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "legacy.txt", b"\x93quoted\x94");
        let mut session = controller();

        session.open(&path).unwrap();
        assert_eq!(
            session.active_tab().editable_text().as_deref(),
            Some("\u{201C}quoted\u{201D}")
        );
    }

    #[test]
    fn test_markdown_opens_as_dual_view() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "README.md", b"# Title\n");
        let mut session = controller();

        session.open(&path).unwrap();
        match session.active_tab().content() {
            TabContent::DualView(view) => {
                assert_eq!(view.raw().text(), "# Title\n");
                assert_eq!(view.rendered().plain_text(), "Title");
            }
            other => panic!("expected dual view, got {:?}", other),
        }
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", b"hello");
        let mut session = controller();
        session.open(&path).unwrap();

        let surface = session.active_surface_mut().unwrap();
        surface.move_document_end();
        surface.insert_str(" world");
        assert!(session.active_tab().is_modified());

        let outcome = session.save().unwrap();
        assert_eq!(outcome.display_name, "notes.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello world");
        assert_eq!(session.cache().get(&path), Some("hello world"));
        assert!(!session.active_tab().is_modified());

        let mut fresh = controller();
        fresh.open(&path).unwrap();
        assert_eq!(fresh.active_tab().editable_text().as_deref(), Some("hello world"));
    }

    #[test]
    fn test_save_writes_raw_text_and_refreshes_rendered() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "doc.md", b"# Old\n");
        let mut session = controller();
        session.open(&path).unwrap();

        session.toggle_view_mode();
        assert!(session.active_surface_mut().is_none());
        session.toggle_view_mode();

        let surface = session.active_surface_mut().unwrap();
        surface.set_text("**new**\n");
        session.save().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "**new**\n");
        match session.active_tab().content() {
            TabContent::DualView(view) => assert_eq!(view.rendered().plain_text(), "new"),
            other => panic!("expected dual view, got {:?}", other),
        }
    }

    #[test]
    fn test_save_welcome_is_nothing_to_save() {
        let dir = TempDir::new().unwrap();
        let mut session = controller();

        let err = session.save().unwrap_err();
        assert!(matches!(err, SessionError::NothingToSave));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_unregistered_tab_is_unresolvable() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"a");
        let mut session = controller();
        let tab_id = session.open(&path).unwrap().tab_id().clone();
        session.registry.unregister(&tab_id);

        let err = session.save().unwrap_err();
        assert!(matches!(err, SessionError::UnresolvablePath { .. }));
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let path = sub.join("a.txt");
        std::fs::write(&path, "before").unwrap();

        let mut session = controller();
        session.open(&path).unwrap();
        session.active_surface_mut().unwrap().set_text("after");
        std::fs::remove_dir_all(&sub).unwrap();

        let err = session.save().unwrap_err();
        assert!(matches!(err, SessionError::SaveFailed { .. }));
        assert_eq!(session.cache().get(&path), Some("before"));
        assert_eq!(session.active_tab().editable_text().as_deref(), Some("after"));
    }

    #[test]
    fn test_auto_save_skips_welcome() {
        let mut session = controller();
        assert!(session.auto_save().is_none());
    }

    #[test]
    fn test_auto_save_writes_active_tab() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"a");
        let mut session = controller();
        session.open(&path).unwrap();
        session.active_surface_mut().unwrap().set_text("b");

        assert!(matches!(session.auto_save(), Some(Ok(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "b");
    }

    #[test]
    fn test_close_forgets_path_and_cache() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.txt", b"a");
        let mut session = controller();
        let tab_id = session.open(&path).unwrap().tab_id().clone();

        let outcome = session.close_active().unwrap();
        assert_eq!(outcome.tab_id, tab_id);
        assert_eq!(outcome.path.as_deref(), Some(path.as_path()));
        assert_eq!(session.tab_count(), 1);
        assert!(session.registry().is_open(&path).is_none());
        assert!(!session.cache().contains(&path));

        let reopened = session.open(&path).unwrap();
        assert!(matches!(reopened, OpenOutcome::Opened { from_cache: false, .. }));
    }

    #[test]
    fn test_close_rejects_last_and_welcome_tab() {
        let dir = TempDir::new().unwrap();
        let mut session = controller();
        assert!(matches!(
            session.close_active(),
            Err(SessionError::CloseRejected { what: "last tab" })
        ));

        session.open(&write(&dir, "a.txt", b"a")).unwrap();
        session.activate(&TabId::welcome());
        assert!(matches!(
            session.close_active(),
            Err(SessionError::CloseRejected { what: "welcome tab" })
        ));
        assert_eq!(session.tab_count(), 2);
    }

    #[test]
    fn test_close_moves_active_to_neighbor() {
        let dir = TempDir::new().unwrap();
        let mut session = controller();
        session.open(&write(&dir, "a.txt", b"a")).unwrap();
        session.open(&write(&dir, "b.txt", b"b")).unwrap();

        session.close_active().unwrap();
        assert_eq!(session.active_index(), 1);
        assert_eq!(session.active_tab().title(), "a.txt");
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let dir = TempDir::new().unwrap();
        let mut session = controller();
        session.open(&write(&dir, "a.txt", b"a")).unwrap();

        session.next_tab();
        assert_eq!(session.active_index(), 0);
        session.prev_tab();
        assert_eq!(session.active_index(), 1);
    }

    #[test]
    fn test_cache_eviction_through_open() {
        let dir = TempDir::new().unwrap();
        let settings = SessionSettings {
            cache_capacity: 2,
            ..SessionSettings::default()
        };
        let mut session = SessionController::new(settings, LanguageMap::default());
        let a = write(&dir, "a.txt", b"a");
        let b = write(&dir, "b.txt", b"b");
        let c = write(&dir, "c.txt", b"c");
        session.open(&a).unwrap();
        session.open(&b).unwrap();
        session.open(&c).unwrap();

        assert_eq!(session.cache().len(), 2);
        assert!(!session.cache().contains(&a));
        assert!(session.registry().is_open(&a).is_some());
    }
}
