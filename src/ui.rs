use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use panedit_app::{AppState, Focus};
use panedit_file_tree::FileTree;
use panedit_session::{SessionController, TabContent, ViewMode};
use panedit_ui_render::{
    render_file_tree, render_rendered_document, render_tab_bar, render_text_surface,
    render_welcome, StatusBar, StatusBarParams, Theme,
};

const TREE_WIDTH: u16 = 32;
const COMPACT_TREE_WIDTH: u16 = 24;

/// Render the whole screen: tree, tab strip, active tab and status bar.
pub fn render(
    frame: &mut Frame,
    state: &mut AppState,
    session: &mut SessionController,
    tree: Option<&mut FileTree>,
) {
    let theme = &Theme::DEFAULT;
    let size = frame.area();

    let background = Block::default().style(Style::default().bg(theme.bg));
    frame.render_widget(background, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main area
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    let tree = tree.filter(|_| state.layout.tree_visible());
    let content_area = match tree {
        Some(tree) => {
            let width = if state.layout.compact {
                COMPACT_TREE_WIDTH
            } else {
                TREE_WIDTH
            };
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(width), Constraint::Min(0)])
                .split(chunks[0]);
            render_tree_area(frame, columns[0], state, tree, theme);
            columns[1]
        }
        None => chunks[0],
    };
    render_content(frame, content_area, state, session, theme);

    let tab = session.active_tab();
    let mode_label = match (tab.content(), session.view_mode()) {
        (TabContent::DualView(_), ViewMode::RawEditing) => Some("Raw"),
        (TabContent::DualView(_), ViewMode::Rendered) => Some("Rendered"),
        _ => None,
    };
    let params = StatusBarParams {
        theme,
        notice: state.current_notice(),
        tab_title: tab.title(),
        modified: tab.is_modified(),
        kind: tab.kind(),
        mode_label,
        cursor_position: state.cursor_position,
    };
    StatusBar::render(frame.buffer_mut(), chunks[1], &params);
}

fn render_tree_area(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    tree: &mut FileTree,
    theme: &Theme,
) {
    let focused = state.focus == Focus::Tree;
    let border_color = if focused {
        theme.accented_fg
    } else {
        theme.disabled
    };
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(border_color))
        .title(tree.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };
    state.tree_height = list_area.height as usize;
    render_file_tree(frame.buffer_mut(), list_area, tree, focused, theme);
}

fn render_content(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    session: &mut SessionController,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Active tab
        ])
        .split(area);

    let buf = frame.buffer_mut();
    render_tab_bar(buf, rows[0], session.tabs(), session.active_index(), theme);

    let body = rows[1];
    state.editor_height = body.height as usize;
    let focused = state.focus == Focus::Editor;
    let mode = session.view_mode();
    match session.active_tab_mut().content_mut() {
        TabContent::Welcome => render_welcome(buf, body, theme),
        TabContent::Plain(surface) => render_text_surface(buf, body, surface, focused, theme),
        TabContent::DualView(view) => match mode {
            ViewMode::RawEditing => render_text_surface(buf, body, view.raw_mut(), focused, theme),
            ViewMode::Rendered => render_rendered_document(
                buf,
                body,
                view.rendered(),
                view.rendered_scroll(),
                state.layout.outline_visible(),
                theme,
            ),
        },
    }
}
