//! Configuration management for panedit.
//!
//! This crate provides configuration loading and saving in TOML format
//! following XDG directory conventions, plus the user-editable
//! extension → content kind map.

mod languages;
mod settings;
mod xdg;

pub use languages::{LanguageMap, DEFAULT_LANGUAGE_MAP};
pub use settings::{Config, EditorSettings, GeneralSettings, LoggingSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const MAX_FILE_SIZE_MB: u64 = 10;
    pub const CACHE_CAPACITY: usize = 50;
    pub const AUTO_CLOSE_PAIRS: bool = true;
    pub const TAB_SIZE: usize = 4;
    pub const MAX_TAB_SIZE: usize = 16;
    pub const SHOW_FILE_TREE: bool = true;
    pub const MIN_LOG_LEVEL: &str = "info";
}

/// Application-wide constants
pub mod constants {
    /// Bytes in a megabyte
    pub const MEGABYTE: u64 = 1024 * 1024;
    /// Entries kept in the in-memory log ring
    pub const MAX_LOG_ENTRIES: usize = 1000;
    /// Event loop polling interval in milliseconds
    pub const EVENT_HANDLER_INTERVAL_MS: u64 = 100;
    /// File name of the extension map inside the config directory
    pub const LANGUAGE_MAP_FILE: &str = "languages.toml";
    /// File name of the log inside the cache directory
    pub const LOG_FILE: &str = "panedit.log";
}

impl Config {
    /// Load configuration from the XDG config directory.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file is created with defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let mut config: Self = toml::from_str(&original_content)
            .with_context(|| format!("Invalid config: {}", config_path.display()))?;
        config.normalize();

        // Write back when keys were added by defaults
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(config_path)?;
        }

        Ok(config)
    }

    /// Clamp values that would be unusable at runtime.
    pub fn normalize(&mut self) {
        self.editor.tab_size = self.editor.tab_size.clamp(1, defaults::MAX_TAB_SIZE);
    }

    /// Save configuration to the XDG config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Path of the extension map: `general.language_map` when set,
    /// otherwise `languages.toml` next to the config file.
    pub fn language_map_path(&self) -> Result<PathBuf> {
        match &self.general.language_map {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(get_config_dir()?.join(constants::LANGUAGE_MAP_FILE)),
        }
    }

    /// Path of the log file: `logging.file_path` when set,
    /// otherwise inside the cache directory, falling back to the temp dir.
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(path) = &self.logging.file_path {
            return PathBuf::from(path);
        }
        get_cache_dir()
            .map(|dir| dir.join(constants::LOG_FILE))
            .unwrap_or_else(|_| std::env::temp_dir().join(constants::LOG_FILE))
    }

    /// Maximum size of a file the editor agrees to open, in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.editor.max_file_size_mb.saturating_mul(constants::MEGABYTE)
    }
}
