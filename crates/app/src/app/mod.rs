//! Main application module.
//!
//! Contains the App struct and all event handlers.

use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{backend::Backend, Frame, Terminal};

use panedit_config::{constants, Config, LanguageMap};
use panedit_core::event::{Event, EventHandler};
use panedit_file_tree::FileTree;
use panedit_logger as logger;
use panedit_session::{Notice, SessionController, SessionError, SessionSettings};

use crate::state::{AppState, Focus};

mod commands;
mod key_handler;

/// Main application
pub struct App {
    state: AppState,
    session: SessionController,
    tree: Option<FileTree>,
    event_handler: EventHandler,
}

impl App {
    /// Create the application for the directory `root`.
    ///
    /// Failures to read the extension map or the directory become
    /// notices; the application starts regardless.
    pub fn new(config: Config, root: &Path) -> Self {
        let mut notices = Vec::new();

        let languages = match load_language_map(&config) {
            Ok(map) => {
                logger::info(format!("Loaded {} extension mappings", map.len()));
                map
            }
            Err(err) => {
                let err = SessionError::ConfigLoadFailure {
                    reason: format!("{:#}", err),
                };
                logger::warn(err.to_string());
                notices.push(Notice::from(&err));
                LanguageMap::default()
            }
        };

        let tree = match FileTree::new(root) {
            Ok(tree) => Some(tree),
            Err(err) => {
                logger::error(format!("{:#}", err));
                notices.push(Notice::error(format!("{:#}", err)));
                None
            }
        };

        let session = SessionController::new(SessionSettings::from_config(&config), languages);
        let mut state = AppState::new(config);
        if tree.is_none() {
            state.focus = Focus::Editor;
        }
        for notice in notices {
            state.notify(notice);
        }

        Self {
            state,
            session,
            tree,
            event_handler: EventHandler::new(Duration::from_millis(
                constants::EVENT_HANDLER_INTERVAL_MS,
            )),
        }
    }

    /// Start the global logger as configured.
    pub fn init_logging(config: &Config) {
        let min_level = logger::LogLevel::from_str(&config.logging.min_level)
            .unwrap_or(logger::LogLevel::Info);
        logger::init(
            Some(config.log_file_path()),
            constants::MAX_LOG_ENTRIES,
            min_level,
        );
        logger::info("Application started");
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn tree(&self) -> Option<&FileTree> {
        self.tree.as_ref()
    }

    /// Run the main application loop
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        render_fn: impl Fn(&mut Frame<'_>, &mut AppState, &mut SessionController, Option<&mut FileTree>),
    ) -> Result<()> {
        let size = terminal.size()?;
        self.state.update_terminal_size(size.width, size.height);

        while !self.state.should_quit {
            if self.state.needs_redraw {
                terminal.draw(|frame| {
                    render_fn(
                        frame,
                        &mut self.state,
                        &mut self.session,
                        self.tree.as_mut(),
                    )
                })?;
                self.state.needs_redraw = false;
            }

            match self.event_handler.next()? {
                Event::Key(key) => {
                    self.handle_key_event(key);
                    self.state.needs_redraw = true;
                }
                Event::Resize(width, height) => {
                    self.state.update_terminal_size(width, height);
                    self.state.needs_redraw = true;
                }
                Event::Tick => self.on_tick(Instant::now()),
            }
        }

        logger::info("Application exiting");
        Ok(())
    }

    /// Periodic work: notice expiry and auto-save.
    pub(crate) fn on_tick(&mut self, now: Instant) {
        self.state.expire_notice(now);

        if self.state.auto_save_due(now) {
            self.state.last_auto_save = now;
            match self.session.auto_save() {
                Some(Ok(outcome)) => {
                    logger::debug(format!("Auto-saved {}", outcome.display_name));
                    self.state.needs_redraw = true;
                }
                Some(Err(err)) => self.state.notify(Notice::from(&err)),
                None => {}
            }
        }
    }

    /// Pull the pending cursor event of the active surface into the
    /// status line.
    fn sync_cursor(&mut self) {
        if let Some(surface) = self.session.active_surface_mut() {
            if let Some(event) = surface.take_cursor_event() {
                self.state.cursor_position = Some(event.display_position());
            }
        }
    }

    /// Status line position after the active tab or view mode changed.
    fn reset_cursor_position(&mut self) {
        self.state.cursor_position = self.session.active_surface_mut().map(|surface| {
            surface.take_cursor_event();
            let cursor = surface.cursor();
            (cursor.line + 1, cursor.column + 1)
        });
    }
}

/// Read the extension map, installing the bundled one at the default
/// location on first run.
fn load_language_map(config: &Config) -> Result<LanguageMap> {
    let path = config.language_map_path()?;
    if config.general.language_map.is_none() && LanguageMap::install_default(&path)? {
        logger::info(format!("Installed default extension map at {}", path.display()));
    }
    LanguageMap::load(&path)
}
