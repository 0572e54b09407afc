//! Key event handlers for each view and overlay

use crate::input_key::InputKey;
use crate::message::{ConfirmAction, Message};
use crate::navigation::{NavAction, View};
use crate::state::AppState;
use crate::text_field::TextEdit;

/// Convert key events to messages based on what currently has input
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit with Ctrl+C from anywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    if state.confirm.is_some() {
        return handle_key_confirm_dialog(key);
    }
    if state.alert.is_some() {
        return handle_key_alert(key);
    }
    if state.result_modal().is_some() {
        return handle_key_result_modal(state, key);
    }

    if let InputKey::F(n) = key {
        return View::from_shortcut(n).map(|v| Message::Navigate(NavAction::Open(v)));
    }

    match state.view {
        View::Auth => handle_key_auth(key),
        View::Home => handle_key_home(key),
        View::Sms => handle_key_sms(key),
        View::Qr => handle_key_qr(key),
        View::History => handle_key_history(state, key),
        View::Profile if state.profile.editing => handle_key_profile_edit(key),
        View::Profile => handle_key_profile(state, key),
    }
}

/// Key to edit operation for a focused text input
fn text_edit(key: &InputKey) -> Option<TextEdit> {
    match key {
        InputKey::Char(c) => Some(TextEdit::Insert(*c)),
        InputKey::Backspace => Some(TextEdit::Backspace),
        InputKey::Delete => Some(TextEdit::Delete),
        InputKey::Left => Some(TextEdit::Left),
        InputKey::Right => Some(TextEdit::Right),
        InputKey::Home => Some(TextEdit::Home),
        InputKey::End => Some(TextEdit::End),
        InputKey::CharCtrl('u') => Some(TextEdit::Clear),
        _ => None,
    }
}

/// Neighbouring tab, wrapping around
fn adjacent_tab(view: View, forward: bool) -> View {
    let tabs = View::TABS;
    let idx = tabs.iter().position(|v| *v == view).unwrap_or(0);
    let next = if forward {
        (idx + 1) % tabs.len()
    } else {
        (idx + tabs.len() - 1) % tabs.len()
    };
    tabs[next]
}

/// Tab switching and digit shortcuts for views without a focused input
fn handle_key_tabs(view: View, key: &InputKey) -> Option<Message> {
    match key {
        InputKey::Tab => Some(Message::Navigate(NavAction::Open(adjacent_tab(view, true)))),
        InputKey::BackTab => Some(Message::Navigate(NavAction::Open(adjacent_tab(view, false)))),
        InputKey::Char(c @ '1'..='5') => c
            .to_digit(10)
            .and_then(|d| View::from_shortcut(d as u8))
            .map(|v| Message::Navigate(NavAction::Open(v))),
        _ => None,
    }
}

fn handle_key_confirm_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab
        | InputKey::BackTab
        | InputKey::Left
        | InputKey::Right
        | InputKey::Up
        | InputKey::Down => Some(Message::ConfirmNext),
        InputKey::Enter => Some(Message::ConfirmAccept),
        InputKey::Esc | InputKey::Char('n' | 'N') => Some(Message::ConfirmCancel),
        _ => None,
    }
}

fn handle_key_alert(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char(' ') => Some(Message::DismissAlert),
        _ => None,
    }
}

fn handle_key_result_modal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab
        | InputKey::BackTab
        | InputKey::Left
        | InputKey::Right
        | InputKey::Up
        | InputKey::Down => Some(Message::ModalNext),
        InputKey::Enter => Some(Message::ModalAccept),
        // Esc takes the first option (close / scan next)
        InputKey::Esc => state
            .result_modal()
            .and_then(|m| m.options.first())
            .map(|(_, msg)| msg.clone()),
        _ => None,
    }
}

fn handle_key_auth(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab | InputKey::BackTab | InputKey::Up | InputKey::Down => {
            Some(Message::FocusNext)
        }
        InputKey::Enter => Some(Message::AuthSubmit),
        InputKey::CharCtrl('t') => Some(Message::AuthToggleMode),
        other => text_edit(&other).map(Message::Edit),
    }
}

fn handle_key_home(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::HomeSubmit),
        InputKey::Tab | InputKey::BackTab => handle_key_tabs(View::Home, &key),
        other => text_edit(&other).map(Message::Edit),
    }
}

fn handle_key_sms(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SmsSubmit),
        InputKey::CharCtrl('v') => Some(Message::SmsPaste),
        InputKey::CharCtrl('x') => Some(Message::SmsClear),
        InputKey::Esc => Some(Message::Navigate(NavAction::Back)),
        InputKey::Tab | InputKey::BackTab => handle_key_tabs(View::Sms, &key),
        other => text_edit(&other).map(Message::Edit),
    }
}

fn handle_key_qr(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::QrSubmit),
        InputKey::Esc => Some(Message::Navigate(NavAction::Back)),
        InputKey::Tab | InputKey::BackTab => handle_key_tabs(View::Qr, &key),
        other => text_edit(&other).map(Message::Edit),
    }
}

fn handle_key_history(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::HistorySelectPrevious),
        InputKey::Down | InputKey::Char('j') => Some(Message::HistorySelectNext),
        InputKey::Char('r') => Some(Message::HistoryRefresh),
        InputKey::Char('c') if !state.history.entries.is_empty() => {
            Some(Message::RequestConfirm(ConfirmAction::ClearHistory))
        }
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Esc => Some(Message::Navigate(NavAction::Back)),
        other => handle_key_tabs(View::History, &other),
    }
}

fn handle_key_profile(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('e') if state.profile.session.is_some() => Some(Message::ProfileToggleEdit),
        InputKey::Char('n') => Some(Message::ToggleNotifications),
        InputKey::Char('c') => Some(Message::RequestConfirm(ConfirmAction::ClearHistory)),
        InputKey::Char('l') => Some(Message::RequestConfirm(ConfirmAction::Logout)),
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Esc => Some(Message::Navigate(NavAction::Back)),
        other => handle_key_tabs(View::Profile, &other),
    }
}

fn handle_key_profile_edit(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab | InputKey::BackTab | InputKey::Up | InputKey::Down => {
            Some(Message::FocusNext)
        }
        InputKey::Enter => Some(Message::ProfileSave),
        InputKey::Esc => Some(Message::ProfileToggleEdit),
        other => text_edit(&other).map(Message::Edit),
    }
}
