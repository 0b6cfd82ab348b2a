//! Configuration structures for panedit settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Path to the extension map (defaults to languages.toml in the config dir)
    #[serde(default)]
    pub language_map: Option<String>,

    /// Show the directory tree on startup
    #[serde(default = "default_show_file_tree")]
    pub show_file_tree: bool,
}

/// Editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Files above this size are refused
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Number of file contents kept in memory
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Periodic save of the active tab (disabled when absent)
    #[serde(default)]
    pub auto_save_interval_secs: Option<u64>,

    /// Typing an opening bracket or quote inserts the closing one too
    #[serde(default = "default_auto_close_pairs")]
    pub auto_close_pairs: bool,

    /// Tab size (number of spaces)
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_show_file_tree() -> bool {
    defaults::SHOW_FILE_TREE
}

fn default_max_file_size_mb() -> u64 {
    defaults::MAX_FILE_SIZE_MB
}

fn default_cache_capacity() -> usize {
    defaults::CACHE_CAPACITY
}

fn default_auto_close_pairs() -> bool {
    defaults::AUTO_CLOSE_PAIRS
}

fn default_tab_size() -> usize {
    defaults::TAB_SIZE
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language_map: None,
            show_file_tree: default_show_file_tree(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            cache_capacity: default_cache_capacity(),
            auto_save_interval_secs: None,
            auto_close_pairs: default_auto_close_pairs(),
            tab_size: default_tab_size(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
