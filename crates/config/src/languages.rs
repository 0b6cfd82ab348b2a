//! Extension → content kind map.
//!
//! The map is a flat TOML table, one `".ext" = "kind"` pair per line:
//!
//! ```toml
//! ".py" = "python"
//! ".md" = "markdown"
//! ```

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Map shipped with panedit, installed on first run.
pub const DEFAULT_LANGUAGE_MAP: &str = include_str!("../../../assets/languages.toml");

/// Lookup table from lowercase extension (with leading dot) to content kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    kinds: HashMap<String, String>,
}

impl LanguageMap {
    /// Read the map from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid {}", path.display()))
    }

    /// Write [`DEFAULT_LANGUAGE_MAP`] to `path` unless a file is already there.
    ///
    /// Returns true when the file was created.
    pub fn install_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_LANGUAGE_MAP)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }

    /// Parse the map from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: HashMap<String, String> = toml::from_str(content)?;
        Ok(raw.into_iter().collect())
    }

    /// Content kind for an extension such as `.md` or `MD`.
    ///
    /// Unknown extensions yield `None`.
    pub fn kind_for_extension(&self, extension: &str) -> Option<&str> {
        self.kinds
            .get(&normalize_extension(extension))
            .map(String::as_str)
    }

    /// Content kind for a path, based on its extension.
    pub fn kind_for_path(&self, path: &Path) -> Option<&str> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.kind_for_extension(ext))
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, extension: &str, kind: impl Into<String>) {
        self.kinds.insert(normalize_extension(extension), kind.into());
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for LanguageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (ext, kind) in iter {
            map.insert(ext.as_ref(), kind);
        }
        map
    }
}

/// Lowercase and make sure the extension starts with a dot.
fn normalize_extension(extension: &str) -> String {
    let lower = extension.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
