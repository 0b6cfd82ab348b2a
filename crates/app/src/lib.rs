//! Application orchestrator for panedit.
//!
//! Owns the session, the file tree and the UI state, runs the event
//! loop and turns keys into commands.

pub mod app;
pub mod state;

pub use app::App;
pub use state::{AppState, Focus, LayoutState};
