//! Key translation: raw terminal keys to table actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Ignored key.
    None,
    /// Quit the application.
    Quit,
    /// Sort by the given column (0-based).
    SelectColumn(usize),
}

/// Digit keys `1..=9` select column `k-1`; `q`/`Q` (and ctrl-c) quit; every
/// other key is a no-op. Range checking against the live schema happens in
/// the sort engine, not here.
pub fn translate_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c) if c.is_ascii_digit() => match c.to_digit(10) {
            Some(k) if k > 0 => KeyAction::SelectColumn(k as usize - 1),
            _ => KeyAction::None,
        },
        _ => KeyAction::None,
    }
}
