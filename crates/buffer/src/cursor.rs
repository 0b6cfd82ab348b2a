use std::cmp::min;

/// Cursor position in document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    /// Line number (0-based)
    pub line: usize,
    /// Position in line in graphemes (0-based)
    pub column: usize,
}

impl Cursor {
    /// Create a new cursor at position (0, 0)
    pub fn new() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Create cursor at specified position
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Move cursor up
    pub fn move_up(&mut self, lines: usize) {
        self.line = self.line.saturating_sub(lines);
    }

    /// Move cursor down
    pub fn move_down(&mut self, lines: usize, max_line: usize) {
        self.line = min(self.line.saturating_add(lines), max_line);
    }

    /// Clamp column to maximum line length
    pub fn clamp_column(&mut self, max_column: usize) {
        self.column = min(self.column, max_column);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

/// Notification emitted by a surface when its cursor changes position.
///
/// Consumed by whoever owns the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    Moved(Cursor),
}

impl CursorEvent {
    /// 1-based `(line, column)` pair for display.
    pub fn display_position(&self) -> (usize, usize) {
        match self {
            CursorEvent::Moved(cursor) => (cursor.line + 1, cursor.column + 1),
        }
    }
}
