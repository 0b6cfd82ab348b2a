//! Global command execution.

use panedit_core::Command;
use panedit_logger as logger;
use panedit_session::Notice;

use super::App;
use crate::state::Focus;

impl App {
    /// Execute a global command. Failures end up in the status line.
    pub fn execute(&mut self, command: Command) {
        logger::debug(format!("Command: {:?}", command));
        match command {
            Command::OpenFile(path) => match self.session.open(&path) {
                Ok(_) => {
                    self.state.focus = Focus::Editor;
                    self.reset_cursor_position();
                }
                Err(err) => self.state.notify(Notice::from(&err)),
            },

            Command::Save => match self.session.save() {
                Ok(outcome) => {
                    self.state
                        .notify(Notice::info(format!("Saved: {}", outcome.display_name)));
                }
                Err(err) => self.state.notify(Notice::from(&err)),
            },

            Command::CloseTab => match self.session.close_active() {
                Ok(_) => self.reset_cursor_position(),
                Err(err) => self.state.notify(Notice::from(&err)),
            },

            Command::ToggleCompact => {
                self.state.layout.toggle_compact();
                self.fix_focus();
            }

            Command::ToggleTree => {
                if self.state.layout.toggle_tree() {
                    self.fix_focus();
                }
            }

            Command::ToggleViewMode => {
                self.session.toggle_view_mode();
                self.reset_cursor_position();
            }

            Command::NextTab => {
                self.session.next_tab();
                self.reset_cursor_position();
            }

            Command::PrevTab => {
                self.session.prev_tab();
                self.reset_cursor_position();
            }

            Command::ToggleFocus => {
                self.state.focus = match self.state.focus {
                    Focus::Tree => Focus::Editor,
                    Focus::Editor if self.tree_available() => Focus::Tree,
                    Focus::Editor => Focus::Editor,
                };
            }

            Command::Quit => self.state.quit(),
        }
        self.state.needs_redraw = true;
    }

    fn tree_available(&self) -> bool {
        self.tree.is_some() && self.state.layout.tree_visible()
    }

    /// Move focus off the tree when it is no longer shown.
    fn fix_focus(&mut self) {
        if self.state.focus == Focus::Tree && !self.tree_available() {
            self.state.focus = Focus::Editor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{test_config, workspace};
    use super::*;
    use panedit_session::{Severity, TabContent, ViewMode};

    #[test]
    fn test_open_moves_focus_and_reports_position() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);

        app.execute(Command::OpenFile(root.join("a.txt")));
        assert_eq!(app.state().focus, Focus::Editor);
        assert_eq!(app.session().tab_count(), 2);
        assert_eq!(app.state().cursor_position, Some((1, 1)));
    }

    #[test]
    fn test_open_failure_becomes_notice() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);

        app.execute(Command::OpenFile(root.join("missing.txt")));
        assert_eq!(app.session().tab_count(), 1);
        assert_eq!(
            app.state().current_notice().unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn test_save_reports_display_name() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);
        app.execute(Command::OpenFile(root.join("a.txt")));

        app.execute(Command::Save);
        let notice = app.state().current_notice().unwrap();
        assert_eq!(notice.message, "Saved: a.txt");
        assert_eq!(notice.severity, Severity::Info);
    }

    #[test]
    fn test_save_on_welcome_is_info_notice() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);

        app.execute(Command::Save);
        let notice = app.state().current_notice().unwrap();
        assert_eq!(notice.message, "Nothing to save");
        assert_eq!(notice.severity, Severity::Info);
    }

    #[test]
    fn test_close_tab_then_reject_welcome() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);
        app.execute(Command::OpenFile(root.join("a.txt")));

        app.execute(Command::CloseTab);
        assert_eq!(app.session().tab_count(), 1);
        assert!(app.state().current_notice().is_none());

        app.execute(Command::CloseTab);
        assert!(app.state().current_notice().is_some());
        assert_eq!(app.session().tab_count(), 1);
    }

    #[test]
    fn test_toggle_view_mode_applies_to_markup_tab() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);
        app.execute(Command::OpenFile(root.join("doc.md")));
        assert!(matches!(
            app.session().active_tab().content(),
            TabContent::DualView(_)
        ));

        app.execute(Command::ToggleViewMode);
        assert_eq!(app.session().view_mode(), ViewMode::Rendered);
        assert_eq!(app.state().cursor_position, None);

        app.execute(Command::ToggleViewMode);
        assert_eq!(app.session().view_mode(), ViewMode::RawEditing);
        assert_eq!(app.state().cursor_position, Some((1, 1)));
    }

    #[test]
    fn test_hiding_tree_moves_focus() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);
        assert_eq!(app.state().focus, Focus::Tree);

        app.execute(Command::ToggleTree);
        assert!(app.state().layout.tree_visible());

        app.execute(Command::ToggleCompact);
        app.execute(Command::ToggleTree);
        assert!(!app.state().layout.tree_visible());
        assert_eq!(app.state().focus, Focus::Editor);

        app.execute(Command::ToggleFocus);
        assert_eq!(app.state().focus, Focus::Editor);

        app.execute(Command::ToggleCompact);
        app.execute(Command::ToggleFocus);
        assert_eq!(app.state().focus, Focus::Tree);
    }

    #[test]
    fn test_tab_cycling_and_quit() {
        let (dir, root) = workspace();
        let mut app = App::new(test_config(&dir), &root);
        app.execute(Command::OpenFile(root.join("a.txt")));

        app.execute(Command::NextTab);
        assert_eq!(app.session().active_index(), 0);
        assert_eq!(app.state().cursor_position, None);
        app.execute(Command::PrevTab);
        assert_eq!(app.session().active_index(), 1);

        app.execute(Command::Quit);
        assert!(app.state().should_quit);
    }
}
