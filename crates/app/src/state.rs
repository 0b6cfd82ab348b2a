//! Application state outside the session: layout, focus, status line.

use std::time::{Duration, Instant};

use panedit_config::Config;
use panedit_session::Notice;

/// How long a notice stays in the status line.
const NOTICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Area receiving non-global keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Editor,
}

/// Visibility of the side areas.
///
/// Compact mode suppresses the outline sidebar and allows hiding the
/// tree. Leaving compact mode always brings the tree back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutState {
    pub compact: bool,
    pub tree_hidden: bool,
}

impl LayoutState {
    pub fn toggle_compact(&mut self) {
        self.compact = !self.compact;
        if !self.compact {
            self.tree_hidden = false;
        }
    }

    /// Hide or show the tree. Only has an effect in compact mode.
    pub fn toggle_tree(&mut self) -> bool {
        if self.compact {
            self.tree_hidden = !self.tree_hidden;
        }
        self.compact
    }

    pub fn tree_visible(&self) -> bool {
        !(self.compact && self.tree_hidden)
    }

    pub fn outline_visible(&self) -> bool {
        !self.compact
    }
}

/// Global application state
#[derive(Debug)]
pub struct AppState {
    /// Should application quit
    pub should_quit: bool,
    /// Flag indicating UI needs to be redrawn
    pub needs_redraw: bool,
    /// Application configuration
    pub config: Config,
    pub layout: LayoutState,
    pub focus: Focus,
    /// Current notice and when it was raised
    pub notice: Option<(Notice, Instant)>,
    /// 1-based cursor position of the active surface, fed by cursor events
    pub cursor_position: Option<(usize, usize)>,
    pub terminal_width: u16,
    pub terminal_height: u16,
    /// Rows available to the editor, updated during rendering
    pub editor_height: usize,
    /// Rows available to the tree, updated during rendering
    pub tree_height: usize,
    pub last_auto_save: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let layout = if config.general.show_file_tree {
            LayoutState::default()
        } else {
            LayoutState {
                compact: true,
                tree_hidden: true,
            }
        };
        Self {
            should_quit: false,
            needs_redraw: true,
            config,
            layout,
            focus: Focus::Tree,
            notice: None,
            cursor_position: None,
            terminal_width: 0,
            terminal_height: 0,
            editor_height: 1,
            tree_height: 1,
            last_auto_save: Instant::now(),
        }
    }

    /// Request application quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
    }

    /// Show `notice`, replacing the current one.
    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some((notice, Instant::now()));
        self.needs_redraw = true;
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().map(|(notice, _)| notice)
    }

    /// Drop the notice once it has been shown long enough.
    pub fn expire_notice(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|(_, raised)| now.duration_since(*raised) >= NOTICE_TIMEOUT)
        {
            self.notice = None;
            self.needs_redraw = true;
        }
    }

    /// Whether the periodic save should run at `now`.
    pub fn auto_save_due(&self, now: Instant) -> bool {
        match self.config.editor.auto_save_interval_secs {
            Some(secs) if secs > 0 => {
                now.duration_since(self.last_auto_save) >= Duration::from_secs(secs)
            }
            _ => false,
        }
    }
}
