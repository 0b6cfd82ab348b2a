//! Rendered markdown with an optional outline sidebar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span as TextSpan},
};

use panedit_markdown::{InlineStyle, LineKind, RenderedDocument, RenderedLine};

use crate::theme::Theme;

const OUTLINE_MAX_WIDTH: u16 = 30;

/// Render `doc` starting at line `scroll`. The outline takes the left
/// part of the area when `show_outline` is set and the document has
/// headings.
pub fn render_rendered_document(
    buf: &mut Buffer,
    area: Rect,
    doc: &RenderedDocument,
    scroll: usize,
    show_outline: bool,
    theme: &Theme,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let body = if show_outline && !doc.outline.is_empty() && area.width > OUTLINE_MAX_WIDTH * 2 {
        let outline_width = OUTLINE_MAX_WIDTH.min(area.width / 3);
        let outline_area = Rect {
            width: outline_width,
            ..area
        };
        render_outline(buf, outline_area, doc, scroll, theme);
        Rect {
            x: area.x + outline_width + 1,
            width: area.width - outline_width - 1,
            ..area
        }
    } else {
        area
    };

    for (row, line) in doc
        .lines
        .iter()
        .skip(scroll)
        .take(body.height as usize)
        .enumerate()
    {
        let rendered = to_line(line, body.width, theme);
        buf.set_line(body.x, body.y + row as u16, &rendered, body.width);
    }
}

/// Heading list; the section containing `scroll` is highlighted.
fn render_outline(buf: &mut Buffer, area: Rect, doc: &RenderedDocument, scroll: usize, theme: &Theme) {
    let current = doc
        .outline
        .iter()
        .rposition(|entry| entry.line <= scroll)
        .unwrap_or(0);

    for (row, entry) in doc.outline.iter().take(area.height as usize).enumerate() {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        let style = if row == current {
            Style::default()
                .fg(theme.accented_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.disabled)
        };
        buf.set_stringn(
            area.x,
            area.y + row as u16,
            format!("{}{}", indent, entry.title),
            area.width as usize,
            style,
        );
    }

    let separator_x = area.x + area.width;
    for row in 0..area.height {
        buf.set_string(
            separator_x,
            area.y + row,
            "│",
            Style::default().fg(theme.disabled),
        );
    }
}

/// Styled terminal line for one rendered line.
pub fn to_line(line: &RenderedLine, width: u16, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    for _ in 0..line.quote_depth {
        spans.push(TextSpan::styled("│ ", Style::default().fg(theme.disabled)));
    }

    match line.kind {
        LineKind::Rule => {
            spans.push(TextSpan::styled(
                "─".repeat(width as usize),
                Style::default().fg(theme.disabled),
            ));
        }
        LineKind::Heading(level) => {
            let mut style = Style::default()
                .fg(theme.accented_fg)
                .add_modifier(Modifier::BOLD);
            if level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(TextSpan::styled(line.plain_text(), style));
        }
        LineKind::Code => {
            spans.push(TextSpan::styled(
                line.plain_text(),
                Style::default().fg(theme.warning),
            ));
        }
        LineKind::Paragraph | LineKind::ListItem | LineKind::Blank => {
            for span in &line.spans {
                spans.push(TextSpan::styled(span.text.clone(), inline_style(span.style, theme)));
            }
        }
    }
    Line::from(spans)
}

fn inline_style(style: InlineStyle, theme: &Theme) -> Style {
    let mut result = Style::default().fg(theme.fg);
    if style.strong {
        result = result.add_modifier(Modifier::BOLD);
    }
    if style.emphasis {
        result = result.add_modifier(Modifier::ITALIC);
    }
    if style.code {
        result = result.fg(theme.warning);
    }
    if style.link {
        result = result
            .fg(theme.accented_fg)
            .add_modifier(Modifier::UNDERLINED);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use panedit_markdown::render;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_quote_prefix_and_styles() {
        let doc = render("> **bold**");
        let line = to_line(&doc.lines[0], 20, &Theme::DEFAULT);
        assert_eq!(line.spans[0].content, "│ ");
        assert_eq!(line.spans[1].content, "bold");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_outline_hidden_when_disabled() {
        let doc = render("# Intro\n\ntext\n");
        let area = Rect::new(0, 0, 80, 3);

        let mut buf = Buffer::empty(area);
        render_rendered_document(&mut buf, area, &doc, 0, false, &Theme::DEFAULT);
        assert!(row(&buf, 0).starts_with("Intro"));

        let mut buf = Buffer::empty(area);
        render_rendered_document(&mut buf, area, &doc, 0, true, &Theme::DEFAULT);
        assert!(row(&buf, 0).starts_with("Intro"));
        assert!(row(&buf, 0).contains("│Intro"));
    }

    #[test]
    fn test_scroll_skips_lines() {
        let doc = render("one\n\ntwo\n");
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        render_rendered_document(&mut buf, area, &doc, 2, false, &Theme::DEFAULT);
        assert_eq!(row(&buf, 0).trim_end(), "two");
    }
}
