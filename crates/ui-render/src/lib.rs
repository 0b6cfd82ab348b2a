//! UI rendering components for panedit.
//!
//! Widgets draw straight into a ratatui [`Buffer`](ratatui::buffer::Buffer);
//! composing them into a frame is left to the binary.

pub mod editor_view;
pub mod file_tree_view;
pub mod markdown_view;
pub mod status_bar;
pub mod tab_bar;
pub mod theme;
pub mod welcome;

pub use editor_view::render_text_surface;
pub use file_tree_view::render_file_tree;
pub use markdown_view::render_rendered_document;
pub use status_bar::{StatusBar, StatusBarParams};
pub use tab_bar::render_tab_bar;
pub use theme::Theme;
pub use welcome::render_welcome;
