use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};
use unicode_width::UnicodeWidthStr;

use panedit_session::{Notice, Severity};

use crate::theme::Theme;

/// Status bar rendering parameters (extracted from AppState to avoid cyclic deps)
pub struct StatusBarParams<'a> {
    pub theme: &'a Theme,
    pub notice: Option<&'a Notice>,
    /// Title of the active tab
    pub tab_title: &'a str,
    pub modified: bool,
    /// Content kind from the extension map
    pub kind: Option<&'a str>,
    /// Label of the view mode, only for markup tabs
    pub mode_label: Option<&'a str>,
    /// 1-based cursor position of the active surface
    pub cursor_position: Option<(usize, usize)>,
}

/// Status bar at the bottom of screen
pub struct StatusBar;

impl StatusBar {
    pub fn render(buf: &mut Buffer, area: Rect, params: &StatusBarParams<'_>) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let theme = params.theme;
        let base = Style::default().bg(theme.accented_bg).fg(theme.fg);
        buf.set_style(Rect { height: 1, ..area }, base);

        let right = Self::position_text(params.cursor_position);
        let right_width = right.width() as u16;

        let (left, left_style) = match params.notice {
            Some(notice) => (
                notice.message.clone(),
                base.fg(severity_color(theme, notice.severity))
                    .add_modifier(Modifier::BOLD),
            ),
            None => (Self::tab_text(params), base),
        };

        let left_room = area.width.saturating_sub(right_width + 2) as usize;
        buf.set_stringn(area.x + 1, area.y, &left, left_room, left_style);
        if right_width + 1 < area.width {
            buf.set_string(
                area.right() - right_width - 1,
                area.y,
                &right,
                base.fg(theme.accented_fg),
            );
        }
    }

    /// `Ln L, Col C`, or nothing when no editable surface is active.
    pub fn position_text(position: Option<(usize, usize)>) -> String {
        match position {
            Some((line, column)) => format!("Ln {}, Col {}", line, column),
            None => String::new(),
        }
    }

    fn tab_text(params: &StatusBarParams<'_>) -> String {
        let mut text = params.tab_title.to_string();
        if params.modified {
            text.push_str(" [+]");
        }
        if let Some(kind) = params.kind {
            text.push_str(" | ");
            text.push_str(kind);
        }
        if let Some(label) = params.mode_label {
            text.push_str(" | ");
            text.push_str(label);
        }
        text
    }
}

fn severity_color(theme: &Theme, severity: Severity) -> ratatui::style::Color {
    match severity {
        Severity::Info => theme.success,
        Severity::Warning => theme.warning,
        Severity::Error => theme.error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_position_text() {
        assert_eq!(StatusBar::position_text(Some((3, 14))), "Ln 3, Col 14");
        assert_eq!(StatusBar::position_text(None), "");
    }

    #[test]
    fn test_renders_notice_over_tab_title() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        let notice = Notice::error("Cannot open binary file: x.png");
        let params = StatusBarParams {
            theme: &Theme::DEFAULT,
            notice: Some(&notice),
            tab_title: "a.txt",
            modified: false,
            kind: Some("text"),
            mode_label: None,
            cursor_position: Some((1, 1)),
        };
        StatusBar::render(&mut buf, area, &params);

        let text = row(&buf, 0);
        assert!(text.contains("Cannot open binary"));
        assert!(!text.contains("a.txt"));
        assert!(text.trim_end().ends_with("Ln 1, Col 1"));
    }

    #[test]
    fn test_renders_tab_title_with_mode() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let params = StatusBarParams {
            theme: &Theme::DEFAULT,
            notice: None,
            tab_title: "README.md",
            modified: true,
            kind: Some("markdown"),
            mode_label: Some("Rendered"),
            cursor_position: None,
        };
        StatusBar::render(&mut buf, area, &params);
        assert!(row(&buf, 0).contains("README.md [+] | markdown | Rendered"));
    }

    #[test]
    fn test_unmapped_kind_shows_title_only() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        let params = StatusBarParams {
            theme: &Theme::DEFAULT,
            notice: None,
            tab_title: "Makefile",
            modified: false,
            kind: None,
            mode_label: None,
            cursor_position: Some((2, 3)),
        };
        StatusBar::render(&mut buf, area, &params);
        let text = row(&buf, 0);
        assert_eq!(text.split_whitespace().next(), Some("Makefile"));
        assert!(!text.contains('|'));
    }
}
