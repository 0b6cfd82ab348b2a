//! Plain text surface with a line-number gutter.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use panedit_buffer::TextSurface;

use crate::theme::Theme;

/// Display width of a tab character.
const TAB_WIDTH: usize = 4;

/// Render `surface`, scrolling it so the cursor stays visible.
///
/// The cursor cell is drawn reversed when `focused`. Lines wider than
/// the area are cut off.
pub fn render_text_surface(
    buf: &mut Buffer,
    area: Rect,
    surface: &mut TextSurface,
    focused: bool,
    theme: &Theme,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    surface.ensure_cursor_visible(area.height as usize);

    let gutter = gutter_width(surface.line_count());
    if area.width <= gutter {
        return;
    }
    let text_x = area.x + gutter;
    let text_width = (area.width - gutter) as usize;
    let scroll_top = surface.scroll_top();
    let number_style = Style::default().fg(theme.disabled);
    let text_style = Style::default().fg(theme.fg);

    for row in 0..area.height {
        let index = scroll_top + row as usize;
        let Some(line) = surface.line(index) else {
            break;
        };
        let y = area.y + row;
        let number = format!("{:>width$} ", index + 1, width = (gutter - 1) as usize);
        buf.set_string(area.x, y, number, number_style);
        buf.set_stringn(text_x, y, expand_tabs(&line), text_width, text_style);
    }

    if focused {
        let cursor = surface.cursor();
        if cursor.line >= scroll_top && cursor.line < scroll_top + area.height as usize {
            let line = surface.line(cursor.line).unwrap_or_default();
            let column = display_column(&line, cursor.column).min(text_width - 1);
            let x = text_x + column as u16;
            let y = area.y + (cursor.line - scroll_top) as u16;
            buf[(x, y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
    }
}

/// Width of the gutter for `line_count` lines, including one space.
fn gutter_width(line_count: usize) -> u16 {
    let digits = line_count.max(1).to_string().len().max(3);
    digits as u16 + 1
}

fn expand_tabs(line: &str) -> String {
    line.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Screen column of grapheme `column` within `line`.
fn display_column(line: &str, column: usize) -> usize {
    line.graphemes(true)
        .take(column)
        .map(|g| if g == "\t" { TAB_WIDTH } else { g.width() })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use panedit_buffer::Cursor;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_display_column_counts_wide_chars_and_tabs() {
        assert_eq!(display_column("abc", 2), 2);
        assert_eq!(display_column("\tx", 1), TAB_WIDTH);
        assert_eq!(display_column("日本", 1), 2);
    }

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(0), 4);
        assert_eq!(gutter_width(12345), 6);
    }

    #[test]
    fn test_renders_numbers_text_and_cursor() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let mut surface = TextSurface::from_text("first\nsecond\n");
        surface.set_cursor(Cursor::at(1, 2));

        render_text_surface(&mut buf, area, &mut surface, true, &Theme::DEFAULT);

        assert_eq!(row(&buf, 0).trim_end(), "  1 first");
        assert_eq!(row(&buf, 1).trim_end(), "  2 second");
        assert!(buf[(6, 1)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(5, 1)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_scrolls_to_cursor() {
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        let mut surface = TextSurface::from_text("a\nb\nc\nd\n");
        surface.set_cursor(Cursor::at(3, 0));

        render_text_surface(&mut buf, area, &mut surface, false, &Theme::DEFAULT);
        assert_eq!(row(&buf, 1).trim_end(), "  4 d");
    }
}
