//! Auto-closing bracket and quote pairs.

/// Closing counterpart inserted when `open` is typed.
pub fn closing_pair(open: char) -> Option<char> {
    match open {
        '"' => Some('"'),
        '\'' => Some('\''),
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        _ => None,
    }
}
