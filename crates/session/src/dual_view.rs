//! Raw/rendered pair for markup documents.

use panedit_buffer::TextSurface;
use panedit_markdown::{render, RenderedDocument};

/// Which face of markup tabs is shown. Shared by all tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    RawEditing,
    Rendered,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::RawEditing => ViewMode::Rendered,
            ViewMode::Rendered => ViewMode::RawEditing,
        }
    }
}

/// Editable raw text plus a read-only rendered snapshot of it.
///
/// The snapshot is only refreshed by [`DualView::update`] and
/// [`DualView::set_text`]; edits to the raw surface do not touch it.
#[derive(Debug)]
pub struct DualView {
    raw: TextSurface,
    rendered: RenderedDocument,
    rendered_scroll: usize,
}

impl DualView {
    pub fn new(raw: TextSurface) -> Self {
        let rendered = render(&raw.text());
        Self {
            raw,
            rendered,
            rendered_scroll: 0,
        }
    }

    pub fn raw(&self) -> &TextSurface {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut TextSurface {
        &mut self.raw
    }

    pub fn rendered(&self) -> &RenderedDocument {
        &self.rendered
    }

    /// Rebuild the rendered snapshot from `text`.
    pub fn update(&mut self, text: &str) {
        self.rendered = render(text);
        let last_line = self.rendered.line_count().saturating_sub(1);
        self.rendered_scroll = self.rendered_scroll.min(last_line);
    }

    /// Replace the raw text and refresh the snapshot.
    pub fn set_text(&mut self, text: &str) {
        self.raw.set_text(text);
        self.update(text);
    }

    pub fn rendered_scroll(&self) -> usize {
        self.rendered_scroll
    }

    pub fn scroll_rendered_up(&mut self, lines: usize) {
        self.rendered_scroll = self.rendered_scroll.saturating_sub(lines);
    }

    pub fn scroll_rendered_down(&mut self, lines: usize) {
        let last_line = self.rendered.line_count().saturating_sub(1);
        self.rendered_scroll = (self.rendered_scroll + lines).min(last_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::default(), ViewMode::RawEditing);
        assert_eq!(ViewMode::RawEditing.toggled(), ViewMode::Rendered);
        assert_eq!(ViewMode::Rendered.toggled(), ViewMode::RawEditing);
    }

    #[test]
    fn test_edits_do_not_refresh_snapshot() {
        let mut view = DualView::new(TextSurface::from_text("# Old\n"));
        view.raw_mut().move_document_end();
        view.raw_mut().insert_str("\n# New\n");

        assert!(view.raw().text().contains("# New"));
        assert!(!view.rendered().plain_text().contains("New"));

        let text = view.raw().text();
        view.update(&text);
        assert!(view.rendered().plain_text().contains("New"));
    }

    #[test]
    fn test_set_text_replaces_both_faces() {
        let mut view = DualView::new(TextSurface::from_text("a"));
        view.set_text("**b**");
        assert_eq!(view.raw().text(), "**b**");
        assert_eq!(view.rendered().plain_text(), "b");
    }

    #[test]
    fn test_rendered_scroll_is_clamped() {
        let mut view = DualView::new(TextSurface::from_text("one\n\ntwo\n\nthree\n"));
        view.scroll_rendered_down(100);
        assert_eq!(view.rendered_scroll(), view.rendered().line_count() - 1);
        view.update("short");
        assert_eq!(view.rendered_scroll(), 0);
        view.scroll_rendered_up(3);
        assert_eq!(view.rendered_scroll(), 0);
    }
}
