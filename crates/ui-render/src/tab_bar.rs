//! Tab strip above the content area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use panedit_session::Tab;

use crate::theme::Theme;

const SEPARATOR: &str = "│";

/// Label of a tab: its title, with a dot when modified.
pub fn tab_label(tab: &Tab) -> String {
    if tab.is_modified() {
        format!(" {} ● ", tab.title())
    } else {
        format!(" {} ", tab.title())
    }
}

/// Render the tab strip. Tabs that do not fit are cut off on the right,
/// except that the active tab is always scrolled into view.
pub fn render_tab_bar(buf: &mut Buffer, area: Rect, tabs: &[Tab], active: usize, theme: &Theme) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    buf.set_style(
        Rect { height: 1, ..area },
        Style::default().bg(theme.accented_bg),
    );

    let labels: Vec<String> = tabs.iter().map(tab_label).collect();
    let first = first_visible(&labels, active, area.width as usize);

    let mut x = area.x;
    for (index, label) in labels.iter().enumerate().skip(first) {
        if x >= area.right() {
            break;
        }
        let style = if index == active {
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.selected_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(theme.accented_bg).fg(theme.disabled)
        };
        let room = (area.right() - x) as usize;
        let (next_x, _) = buf.set_stringn(x, area.y, label, room, style);
        x = next_x;
        if x < area.right() {
            buf.set_string(
                x,
                area.y,
                SEPARATOR,
                Style::default().bg(theme.accented_bg).fg(theme.disabled),
            );
            x += 1;
        }
    }
}

/// Index of the first tab to draw so that `active` fits in `width`.
fn first_visible(labels: &[String], active: usize, width: usize) -> usize {
    let mut first = 0;
    let span = |from: usize| -> usize {
        labels[from..=active]
            .iter()
            .map(|label| label.width() + SEPARATOR.width())
            .sum()
    };
    while first < active && span(first) > width {
        first += 1;
    }
    first
}
