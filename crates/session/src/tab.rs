//! Tab panes.

use panedit_buffer::TextSurface;

use crate::dual_view::{DualView, ViewMode};
use crate::tab_id::TabId;

/// What a tab shows.
#[derive(Debug)]
pub enum TabContent {
    Welcome,
    Plain(TextSurface),
    DualView(DualView),
}

/// One entry of the tab strip.
#[derive(Debug)]
pub struct Tab {
    id: TabId,
    title: String,
    kind: Option<String>,
    content: TabContent,
}

impl Tab {
    pub fn welcome() -> Self {
        Self {
            id: TabId::welcome(),
            title: "Welcome".to_string(),
            kind: None,
            content: TabContent::Welcome,
        }
    }

    pub fn new(id: TabId, title: String, kind: Option<String>, content: TabContent) -> Self {
        Self {
            id,
            title,
            kind,
            content,
        }
    }

    pub fn id(&self) -> &TabId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Language kind from the extension map, if known.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn content(&self) -> &TabContent {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut TabContent {
        &mut self.content
    }

    pub fn is_welcome(&self) -> bool {
        matches!(self.content, TabContent::Welcome)
    }

    /// Text that would be written on save: the raw face of markup tabs.
    pub fn editable_text(&self) -> Option<String> {
        match &self.content {
            TabContent::Welcome => None,
            TabContent::Plain(surface) => Some(surface.text()),
            TabContent::DualView(view) => Some(view.raw().text()),
        }
    }

    /// Surface that receives keystrokes under `mode`.
    pub fn active_surface_mut(&mut self, mode: ViewMode) -> Option<&mut TextSurface> {
        match &mut self.content {
            TabContent::Plain(surface) => Some(surface),
            TabContent::DualView(view) if mode == ViewMode::RawEditing => Some(view.raw_mut()),
            _ => None,
        }
    }

    pub fn is_modified(&self) -> bool {
        match &self.content {
            TabContent::Welcome => false,
            TabContent::Plain(surface) => surface.is_modified(),
            TabContent::DualView(view) => view.raw().is_modified(),
        }
    }
}
