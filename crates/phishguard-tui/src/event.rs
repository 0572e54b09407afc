//! Terminal event polling

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use phishguard_app::message::Message;
use phishguard_app::InputKey;
use phishguard_core::prelude::*;
use std::time::Duration;

/// Poll timeout; also the tick interval when the terminal is idle
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Convert crossterm KeyEvent to InputKey
pub fn key_event_to_input(key: crossterm::event::KeyEvent) -> Option<InputKey> {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputKey::CharCtrl(c.to_ascii_lowercase()))
        }
        KeyCode::Char(c) => Some(InputKey::Char(c)),
        KeyCode::Enter => Some(InputKey::Enter),
        KeyCode::Esc => Some(InputKey::Esc),
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(InputKey::BackTab),
        KeyCode::Tab => Some(InputKey::Tab),
        KeyCode::BackTab => Some(InputKey::BackTab),
        KeyCode::Backspace => Some(InputKey::Backspace),
        KeyCode::Delete => Some(InputKey::Delete),
        KeyCode::Up => Some(InputKey::Up),
        KeyCode::Down => Some(InputKey::Down),
        KeyCode::Left => Some(InputKey::Left),
        KeyCode::Right => Some(InputKey::Right),
        KeyCode::Home => Some(InputKey::Home),
        KeyCode::End => Some(InputKey::End),
        KeyCode::PageUp => Some(InputKey::PageUp),
        KeyCode::PageDown => Some(InputKey::PageDown),
        KeyCode::F(n) => Some(InputKey::F(n)),
        _ => None,
    }
}

/// Map a terminal event to a message, if it carries one
pub fn event_to_message(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            key_event_to_input(key).map(Message::Key)
        }
        // The terminal window became active again
        Event::FocusGained => Some(Message::Resumed),
        _ => None,
    }
}

/// Poll for terminal events with timeout
pub fn poll() -> Result<Option<Message>> {
    if event::poll(POLL_INTERVAL)? {
        Ok(event_to_message(event::read()?))
    } else {
        // Generate tick on timeout for the spinner and banner expiry
        Ok(Some(Message::Tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_char_conversion() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::Char('a')));
    }

    #[test]
    fn test_ctrl_chars_are_lowercased() {
        let key = KeyEvent::new(KeyCode::Char('V'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('v')));
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_event_to_input(key), Some(InputKey::CharCtrl('c')));
    }

    #[test]
    fn test_backtab_with_shift() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
        let key = KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), Some(InputKey::BackTab));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(
            key_event_to_input(KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE)),
            Some(InputKey::F(3))
        );
    }

    #[test]
    fn test_unsupported_key_returns_none() {
        let key = KeyEvent::new(KeyCode::Insert, KeyModifiers::NONE);
        assert_eq!(key_event_to_input(key), None);
    }

    #[test]
    fn test_focus_gained_is_resume() {
        assert!(matches!(
            event_to_message(Event::FocusGained),
            Some(Message::Resumed)
        ));
        assert!(event_to_message(Event::FocusLost).is_none());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(event_to_message(Event::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(
            event_to_message(Event::Key(press)),
            Some(Message::Key(InputKey::Enter))
        ));
    }
}
