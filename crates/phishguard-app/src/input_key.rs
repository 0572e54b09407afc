//! Abstract input key event, independent of terminal library.
//!
//! Converted from `crossterm::event::KeyEvent` at the TUI boundary so the
//! application crate never depends on crossterm.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, Ctrl+v, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Whether this key only moves or edits text, with no global meaning
    pub fn is_text_edit(&self) -> bool {
        matches!(
            self,
            InputKey::Char(_)
                | InputKey::Left
                | InputKey::Right
                | InputKey::Home
                | InputKey::End
                | InputKey::Backspace
                | InputKey::Delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_is_distinct() {
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
    }

    #[test]
    fn test_is_text_edit() {
        assert!(InputKey::Char('a').is_text_edit());
        assert!(InputKey::Backspace.is_text_edit());
        assert!(!InputKey::Enter.is_text_edit());
        assert!(!InputKey::F(1).is_text_edit());
    }
}
