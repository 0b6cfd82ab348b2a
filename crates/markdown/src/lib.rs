//! Markdown rendering for panedit.
//!
//! Turns markdown source into a [`RenderedDocument`]: a list of
//! display lines with block and inline styling, plus an outline of
//! headings used for the table-of-contents sidebar. The document is
//! presentation-neutral; terminal styling happens in the UI layer.

mod render;

pub use render::render;

/// Block-level role of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Paragraph,
    /// Heading with its level (1-6)
    Heading(u8),
    ListItem,
    Code,
    Rule,
    Blank,
}

/// Inline styling of a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub link: bool,
}

/// Run of text sharing one inline style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: InlineStyle,
}

/// One display line of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub kind: LineKind,
    /// Nesting depth of block quotes around the line
    pub quote_depth: usize,
    pub spans: Vec<Span>,
}

impl RenderedLine {
    pub(crate) fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            quote_depth: 0,
            spans: Vec::new(),
        }
    }

    /// Line content without styling.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Heading entry of the document outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: u8,
    pub title: String,
    /// Index into [`RenderedDocument::lines`]
    pub line: usize,
}

/// Rendered form of a markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub lines: Vec<RenderedLine>,
    pub outline: Vec<OutlineEntry>,
}

impl RenderedDocument {
    /// Whole document as unstyled text, one rendered line per text line.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(RenderedLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
