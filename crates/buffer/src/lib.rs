//! Plain editable text surface for panedit.
//!
//! Provides rope-backed text storage with a grapheme-aware cursor,
//! basic editing operations and cursor-moved notifications.

mod cursor;
mod pairs;
mod surface;

pub use cursor::{Cursor, CursorEvent};
pub use pairs::closing_pair;
pub use surface::TextSurface;

/// Line ending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    LF, // Unix \n
    CRLF, // Windows \r\n
}

impl LineEnding {
    /// Guess the line ending used by `text` (CRLF wins if present at all).
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CRLF
        } else {
            LineEnding::LF
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::LF => "\n",
            LineEnding::CRLF => "\r\n",
        }
    }
}
