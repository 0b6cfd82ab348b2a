//! Main keyboard event handling for the application.
//!
//! Global shortcuts first; everything else goes to the focused area.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use panedit_core::{command_for_key, Command};
use panedit_file_tree::TreeEvent;
use panedit_logger as logger;
use panedit_session::{TabContent, ViewMode};

use super::App;
use crate::state::Focus;

impl App {
    /// Handle keyboard event
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        logger::debug(format!(
            "Key event: code={:?}, modifiers={:?}",
            key.code, key.modifiers
        ));

        if let Some(command) = command_for_key(&key) {
            self.execute(command);
            return;
        }

        match self.state.focus {
            Focus::Tree if self.tree.is_some() && self.state.layout.tree_visible() => {
                self.handle_tree_key(key)
            }
            _ => self.handle_editor_key(key),
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) {
        let Some(tree) = self.tree.as_mut() else {
            return;
        };
        let event = match key.code {
            KeyCode::Up => {
                tree.select_prev();
                None
            }
            KeyCode::Down => {
                tree.select_next();
                None
            }
            KeyCode::Home => {
                tree.select_first();
                None
            }
            KeyCode::End => {
                tree.select_last();
                None
            }
            KeyCode::Left => {
                tree.collapse_selected();
                None
            }
            KeyCode::Right => {
                tree.expand_selected();
                None
            }
            KeyCode::Enter => tree.activate(),
            _ => None,
        };
        tree.ensure_selected_visible(self.state.tree_height);

        if let Some(TreeEvent::FileSelected(path)) = event {
            self.execute(Command::OpenFile(path));
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let page = self.state.editor_height.max(1);

        if self.session.view_mode() == ViewMode::Rendered {
            if let TabContent::DualView(view) = self.session.active_tab_mut().content_mut() {
                match key.code {
                    KeyCode::Up => view.scroll_rendered_up(1),
                    KeyCode::Down => view.scroll_rendered_down(1),
                    KeyCode::PageUp => view.scroll_rendered_up(page),
                    KeyCode::PageDown => view.scroll_rendered_down(page),
                    _ => {}
                }
                return;
            }
        }

        let Some(surface) = self.session.active_surface_mut() else {
            return;
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                surface.insert_char(ch)
            }
            KeyCode::Enter => surface.insert_newline(),
            KeyCode::Tab => surface.insert_tab(),
            KeyCode::Backspace => {
                surface.backspace();
            }
            KeyCode::Delete => {
                surface.delete();
            }
            KeyCode::Left => surface.move_left(),
            KeyCode::Right => surface.move_right(),
            KeyCode::Up => surface.move_up(1),
            KeyCode::Down => surface.move_down(1),
            KeyCode::PageUp => surface.move_up(page),
            KeyCode::PageDown => surface.move_down(page),
            KeyCode::Home if ctrl => surface.move_document_start(),
            KeyCode::End if ctrl => surface.move_document_end(),
            KeyCode::Home => surface.move_line_start(),
            KeyCode::End => surface.move_line_end(),
            _ => {}
        }
        surface.ensure_cursor_visible(page);
        self.sync_cursor();
    }
}
