//! Contents of the welcome tab.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::theme::Theme;

pub const WELCOME_TITLE: &str = "panedit";

/// Key reference shown on the welcome tab.
pub const WELCOME_LINES: &[(&str, &str)] = &[
    ("Enter", "open the file selected in the tree"),
    ("Ctrl+E", "switch focus between tree and editor"),
    ("Ctrl+S", "save the active tab"),
    ("Ctrl+R", "close the active tab"),
    ("Ctrl+L", "toggle raw / rendered view of markdown"),
    ("Ctrl+W", "toggle compact layout"),
    ("Ctrl+B", "show or hide the tree in compact layout"),
    ("Alt+Left/Right", "previous / next tab"),
    ("Ctrl+Q", "quit"),
];

pub fn render_welcome(buf: &mut Buffer, area: Rect, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let x = area.x + 2;
    let width = area.width.saturating_sub(2) as usize;
    buf.set_stringn(
        x,
        area.y + 1,
        WELCOME_TITLE,
        width,
        Style::default()
            .fg(theme.accented_fg)
            .add_modifier(Modifier::BOLD),
    );

    let key_width = WELCOME_LINES
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or(0);
    for (row, (key, description)) in WELCOME_LINES.iter().enumerate() {
        let y = area.y + 3 + row as u16;
        if y >= area.bottom() {
            break;
        }
        buf.set_stringn(
            x,
            y,
            format!("{:<width$}  {}", key, description, width = key_width),
            width,
            Style::default().fg(theme.fg),
        );
    }
}
