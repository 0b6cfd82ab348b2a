//! Session state of panedit: open tabs, the bounded content cache,
//! path/tab bookkeeping, and file loading with encoding fallback.
//!
//! [`SessionController`] is the entry point. It owns every other piece
//! and is the only place where failures are turned into errors the UI
//! reports as notices.

mod cache;
mod controller;
mod dual_view;
mod encoding;
mod error;
mod loader;
mod notice;
mod registry;
mod tab;
mod tab_id;

pub use cache::ContentCache;
pub use controller::{CloseOutcome, OpenOutcome, SaveOutcome, SessionController, SessionSettings};
pub use dual_view::{DualView, ViewMode};
pub use encoding::Encoding;
pub use error::SessionError;
pub use loader::{decode, load, Decoded, LoadError};
pub use notice::{Notice, Severity};
pub use registry::TabRegistry;
pub use tab::{Tab, TabContent};
pub use tab_id::{sanitize_filename, TabId, WELCOME_TAB_ID};

/// Display name of a path: its final component, or the whole path when
/// there is none.
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
