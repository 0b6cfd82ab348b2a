//! Global commands and their key bindings.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application-level action, independent of the key that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a file in a tab (from the tree or the command line)
    OpenFile(PathBuf),
    /// Save the active tab
    Save,
    /// Close the active tab
    CloseTab,
    /// Toggle compact mode (hides tree and outline)
    ToggleCompact,
    /// Show or hide the tree while in compact mode
    ToggleTree,
    /// Switch markup tabs between raw and rendered view
    ToggleViewMode,
    NextTab,
    PrevTab,
    /// Move focus between the tree and the tabs
    ToggleFocus,
    Quit,
}

/// Map a key press to a global command.
///
/// Letters match case-insensitively so bindings survive Caps Lock.
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        let KeyCode::Char(ch) = key.code else {
            return None;
        };
        return match ch.to_ascii_lowercase() {
            's' => Some(Command::Save),
            'r' => Some(Command::CloseTab),
            'l' => Some(Command::ToggleViewMode),
            'w' => Some(Command::ToggleCompact),
            'b' => Some(Command::ToggleTree),
            'e' => Some(Command::ToggleFocus),
            'q' => Some(Command::Quit),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Right => Some(Command::NextTab),
            KeyCode::Left => Some(Command::PrevTab),
            _ => None,
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_control_bindings() {
        assert_eq!(command_for_key(&ctrl('s')), Some(Command::Save));
        assert_eq!(command_for_key(&ctrl('r')), Some(Command::CloseTab));
        assert_eq!(command_for_key(&ctrl('l')), Some(Command::ToggleViewMode));
        assert_eq!(command_for_key(&ctrl('w')), Some(Command::ToggleCompact));
        assert_eq!(command_for_key(&ctrl('b')), Some(Command::ToggleTree));
        assert_eq!(command_for_key(&ctrl('e')), Some(Command::ToggleFocus));
        assert_eq!(command_for_key(&ctrl('Q')), Some(Command::Quit));
        assert_eq!(command_for_key(&ctrl('x')), None);
    }

    #[test]
    fn test_alt_arrows_switch_tabs() {
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::ALT);
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::ALT);
        assert_eq!(command_for_key(&right), Some(Command::NextTab));
        assert_eq!(command_for_key(&left), Some(Command::PrevTab));
    }

    #[test]
    fn test_plain_keys_are_not_commands() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(command_for_key(&key), None);
        let arrow = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(command_for_key(&arrow), None);
    }
}
