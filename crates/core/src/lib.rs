//! Core event and command types for panedit.
//!
//! Terminal input arrives as [`Event`]s; global shortcuts are mapped to
//! [`Command`]s that the application dispatches.

pub mod command;
pub mod event;

pub use command::{command_for_key, Command};
pub use event::{Event, EventHandler};
