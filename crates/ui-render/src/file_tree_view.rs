//! Directory tree widget.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use panedit_file_tree::{FileTree, TreeEntry};

use crate::theme::Theme;

/// Text of one tree row: indentation, expand marker and name.
pub fn entry_label(entry: &TreeEntry) -> String {
    let indent = "  ".repeat(entry.depth);
    let marker = match (entry.is_dir, entry.expanded) {
        (true, true) => "▾ ",
        (true, false) => "▸ ",
        (false, _) => "  ",
    };
    format!("{}{}{}", indent, marker, entry.name)
}

/// Render the visible rows of `tree`, keeping the selection on screen.
pub fn render_file_tree(buf: &mut Buffer, area: Rect, tree: &mut FileTree, focused: bool, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    tree.ensure_selected_visible(area.height as usize);

    let selected = tree.selected();
    for (row, (index, entry)) in tree
        .entries()
        .iter()
        .enumerate()
        .skip(tree.scroll_offset())
        .take(area.height as usize)
        .enumerate()
    {
        let y = area.y + row as u16;
        let style = if index == selected && focused {
            Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
        } else if index == selected {
            Style::default().fg(theme.accented_fg)
        } else if entry.is_dir {
            Style::default().fg(theme.accented_fg)
        } else {
            Style::default().fg(theme.fg)
        };
        if index == selected {
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
        }
        buf.set_stringn(area.x, y, entry_label(entry), area.width as usize, style);
    }
}
