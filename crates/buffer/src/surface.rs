use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

use crate::pairs::closing_pair;
use crate::{Cursor, CursorEvent, LineEnding};

/// Single-char line breaks recognised by ropey
const LINE_BREAKS: [char; 7] = [
    '\n', '\r', '\u{0B}', '\u{0C}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Plain editable text surface backed by a rope.
///
/// Columns are counted in graphemes. Every operation that moves the
/// cursor queues a [`CursorEvent`] which the owner drains with
/// [`TextSurface::take_cursor_event`].
#[derive(Debug, Clone)]
pub struct TextSurface {
    rope: Rope,
    cursor: Cursor,
    /// Column restored by vertical moves
    preferred_column: usize,
    modified: bool,
    line_ending: LineEnding,
    /// First visible line
    scroll_top: usize,
    auto_close_pairs: bool,
    tab_size: usize,
    reported_cursor: Cursor,
    pending_event: Option<CursorEvent>,
}

impl TextSurface {
    /// Create a surface holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            preferred_column: 0,
            modified: false,
            line_ending: LineEnding::detect(text),
            scroll_top: 0,
            auto_close_pairs: true,
            tab_size: 4,
            reported_cursor: Cursor::new(),
            pending_event: None,
        }
    }

    /// Enable or disable automatic insertion of closing brackets and quotes.
    pub fn with_auto_close_pairs(mut self, enabled: bool) -> Self {
        self.auto_close_pairs = enabled;
        self
    }

    /// Set how many spaces a Tab key inserts.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    /// Full text, exactly as it would be written to disk.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the whole content.
    ///
    /// The cursor is clamped into the new text and the surface counts as
    /// unmodified afterwards.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.line_ending = LineEnding::detect(text);
        self.modified = false;
        self.clamp_cursor();
        self.scroll_top = self.scroll_top.min(self.last_line());
        self.after_cursor_change();
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Forget pending modifications after the text was persisted.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Number of lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line terminator.
    pub fn line(&self, index: usize) -> Option<String> {
        if index >= self.line_count() {
            return None;
        }
        let line = self.rope.line(index).to_string();
        let content = line
            .strip_suffix("\r\n")
            .or_else(|| line.strip_suffix(LINE_BREAKS))
            .unwrap_or(&line);
        Some(content.to_string())
    }

    /// Line length in graphemes, terminator excluded.
    pub fn line_len(&self, index: usize) -> usize {
        self.line(index)
            .map(|line| line.graphemes(true).count())
            .unwrap_or(0)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor to an explicit position (clamped to the text).
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.clamp_cursor();
        self.preferred_column = self.cursor.column;
        self.after_cursor_change();
    }

    /// Drain the pending cursor notification, if any.
    pub fn take_cursor_event(&mut self) -> Option<CursorEvent> {
        self.pending_event.take()
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Adjust scrolling so the cursor line is inside a viewport of `height` lines.
    pub fn ensure_cursor_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor.line < self.scroll_top {
            self.scroll_top = self.cursor.line;
        } else if self.cursor.line >= self.scroll_top + height {
            self.scroll_top = self.cursor.line + 1 - height;
        }
    }

    // ===== Editing =====

    /// Insert a typed character, closing brackets and quotes when enabled.
    pub fn insert_char(&mut self, ch: char) {
        match closing_pair(ch).filter(|_| self.auto_close_pairs) {
            Some(close) => {
                let mut pair = String::with_capacity(2);
                pair.push(ch);
                pair.push(close);
                let idx = self.char_idx(self.cursor);
                self.rope.insert(idx, &pair);
                self.modified = true;
                self.cursor.column += 1;
                self.preferred_column = self.cursor.column;
                self.after_cursor_change();
            }
            None => self.insert_str(ch.encode_utf8(&mut [0; 4])),
        }
    }

    /// Insert text at the cursor and move the cursor past it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let idx = self.char_idx(self.cursor);
        let lines_before = self.rope.len_lines();
        self.rope.insert(idx, text);
        self.modified = true;

        let added_lines = self.rope.len_lines().saturating_sub(lines_before);
        if added_lines > 0 {
            let tail = text
                .rsplit(|c: char| LINE_BREAKS.contains(&c))
                .next()
                .unwrap_or(text);
            self.cursor.line += added_lines;
            self.cursor.column = tail.graphemes(true).count();
        } else {
            self.cursor.column += text.graphemes(true).count();
        }
        self.clamp_cursor();
        self.preferred_column = self.cursor.column;
        self.after_cursor_change();
    }

    /// Split the line at the cursor using the document's line ending.
    pub fn insert_newline(&mut self) {
        self.insert_str(self.line_ending.as_str());
    }

    /// Insert spaces up to the configured tab size.
    pub fn insert_tab(&mut self) {
        self.insert_str(&" ".repeat(self.tab_size));
    }

    /// Delete the grapheme before the cursor, joining lines at column 0.
    ///
    /// Returns `false` when there is nothing to delete.
    pub fn backspace(&mut self) -> bool {
        let Cursor { line, column } = self.cursor;
        let (start, new_cursor) = if column > 0 {
            let prev = Cursor::at(line, column - 1);
            (self.char_idx(prev), prev)
        } else if line > 0 {
            let prev = Cursor::at(line - 1, self.line_len(line - 1));
            (self.char_idx(prev), prev)
        } else {
            return false;
        };

        let end = self.char_idx(self.cursor);
        self.rope.remove(start..end);
        self.modified = true;
        self.cursor = new_cursor;
        self.preferred_column = self.cursor.column;
        self.after_cursor_change();
        true
    }

    /// Delete the grapheme under the cursor, joining lines at line end.
    ///
    /// Returns `false` when the cursor is at the end of the text.
    pub fn delete(&mut self) -> bool {
        let Cursor { line, column } = self.cursor;
        let start = self.char_idx(self.cursor);
        let end = if column < self.line_len(line) {
            self.char_idx(Cursor::at(line, column + 1))
        } else if line < self.last_line() {
            self.rope.line_to_char(line + 1)
        } else {
            return false;
        };

        self.rope.remove(start..end);
        self.modified = true;
        true
    }

    // ===== Movement =====

    pub fn move_left(&mut self) {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.column = self.line_len(self.cursor.line);
        }
        self.preferred_column = self.cursor.column;
        self.after_cursor_change();
    }

    pub fn move_right(&mut self) {
        if self.cursor.column < self.line_len(self.cursor.line) {
            self.cursor.column += 1;
        } else if self.cursor.line < self.last_line() {
            self.cursor.line += 1;
            self.cursor.column = 0;
        }
        self.preferred_column = self.cursor.column;
        self.after_cursor_change();
    }

    pub fn move_up(&mut self, lines: usize) {
        self.cursor.move_up(lines);
        self.restore_preferred_column();
    }

    pub fn move_down(&mut self, lines: usize) {
        let last_line = self.last_line();
        self.cursor.move_down(lines, last_line);
        self.restore_preferred_column();
    }

    pub fn move_line_start(&mut self) {
        self.cursor.column = 0;
        self.preferred_column = 0;
        self.after_cursor_change();
    }

    pub fn move_line_end(&mut self) {
        self.cursor.column = self.line_len(self.cursor.line);
        self.preferred_column = self.cursor.column;
        self.after_cursor_change();
    }

    pub fn move_document_start(&mut self) {
        self.set_cursor(Cursor::new());
    }

    pub fn move_document_end(&mut self) {
        let last_line = self.last_line();
        self.set_cursor(Cursor::at(last_line, self.line_len(last_line)));
    }

    // ===== Internals =====

    fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    fn restore_preferred_column(&mut self) {
        self.cursor.column = self.preferred_column;
        self.cursor.clamp_column(self.line_len(self.cursor.line));
        self.after_cursor_change();
    }

    fn clamp_cursor(&mut self) {
        self.cursor.line = self.cursor.line.min(self.last_line());
        self.cursor.clamp_column(self.line_len(self.cursor.line));
    }

    /// Convert a (line, grapheme column) position to a rope char index.
    fn char_idx(&self, cursor: Cursor) -> usize {
        let line_start = self.rope.line_to_char(cursor.line);
        let line = self.line(cursor.line).unwrap_or_default();
        let char_offset: usize = line
            .graphemes(true)
            .take(cursor.column)
            .map(|g| g.chars().count())
            .sum();
        line_start + char_offset
    }

    fn after_cursor_change(&mut self) {
        if self.cursor != self.reported_cursor {
            self.reported_cursor = self.cursor;
            self.pending_event = Some(CursorEvent::Moved(self.cursor));
        }
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::from_text("")
    }
}
