//! Tab identifiers.

use std::fmt;

use uuid::Uuid;

/// Identifier of the welcome tab. Never produced by [`TabId::allocate`].
pub const WELCOME_TAB_ID: &str = "welcome_tab";

const SUFFIX_LEN: usize = 8;

/// Unique identifier of a tab.
///
/// Allocated ids have the shape `tab_<sanitized filename>_<8 hex chars>`
/// and only contain ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TabId(String);

impl TabId {
    /// Fresh id for a tab showing `filename`.
    pub fn allocate(filename: &str) -> Self {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(SUFFIX_LEN)
            .collect();
        Self::allocate_with_suffix(filename, &suffix)
    }

    /// Id built from `filename` with a caller-chosen suffix.
    pub fn allocate_with_suffix(filename: &str, suffix: &str) -> Self {
        Self(format!(
            "tab_{}_{}",
            sanitize_filename(filename),
            replace_invalid(suffix)
        ))
    }

    pub fn welcome() -> Self {
        Self(WELCOME_TAB_ID.to_string())
    }

    pub fn is_welcome(&self) -> bool {
        self.0 == WELCOME_TAB_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce a filename to identifier-safe characters.
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_`. The result is
/// prefixed with `file_` unless it starts with an ASCII letter.
pub fn sanitize_filename(filename: &str) -> String {
    let safe = replace_invalid(filename);
    if safe.starts_with(|c: char| c.is_ascii_alphabetic()) {
        safe
    } else {
        format!("file_{}", safe)
    }
}

fn replace_invalid(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
