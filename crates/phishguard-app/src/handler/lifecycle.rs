//! Navigation, resume, clipboard and background-scan handlers

use std::time::{Duration, Instant};

use phishguard_core::prelude::*;
use phishguard_core::{threat_notification, ScanOutcome};

use crate::confirm_dialog::AlertState;
use crate::message::{ClipboardPurpose, Message, RequestResult};
use crate::navigation::{navigate, NavAction, View};
use crate::state::{AppState, Banner};
use crate::text_field::TextEdit;
use crate::workflow::auto_scan_candidate;

use super::helpers::failure_alert;
use super::{UpdateAction, UpdateResult};

/// Switch views. The view being left is reset and its tasks aborted, so
/// results still in flight for it are never applied.
pub fn handle_navigate(state: &mut AppState, action: NavAction) -> UpdateResult {
    let transition = navigate(state.view, action);
    if transition.view == state.view && !transition.logout {
        return UpdateResult::none();
    }

    let left = state.view;
    debug!("Navigating {:?} -> {:?}", left, transition.view);
    state.reset_view(left);
    state.view = transition.view;
    state.confirm = None;

    UpdateResult::action_then(
        UpdateAction::CancelViewTasks { view: left },
        Message::ViewEntered {
            view: transition.view,
            logout: transition.logout,
        },
    )
}

pub fn handle_view_entered(state: &mut AppState, view: View, logout: bool) -> UpdateResult {
    if logout {
        info!("Logging out");
        state.last_auto_scanned = None;
        return UpdateResult::action(UpdateAction::RemoveSession);
    }

    match view {
        View::History => {
            state.history.loading = true;
            UpdateResult::action(UpdateAction::LoadHistory)
        }
        View::Profile => UpdateResult::action(UpdateAction::LoadProfile),
        _ => UpdateResult::none(),
    }
}

/// The terminal regained focus. On the SMS view one read both fills the
/// text area and feeds the auto-scan.
pub fn handle_resumed(state: &mut AppState) -> UpdateResult {
    let delay = Duration::from_millis(state.settings.behavior.resume_delay_ms);

    if state.view == View::Sms {
        return UpdateResult::action(UpdateAction::ReadClipboard {
            purpose: ClipboardPurpose::SmsFill,
            delay,
        });
    }

    if state.settings.behavior.auto_scan_clipboard {
        UpdateResult::action(UpdateAction::ReadClipboard {
            purpose: ClipboardPurpose::AutoScan,
            delay,
        })
    } else {
        UpdateResult::none()
    }
}

pub fn handle_clipboard_read(
    state: &mut AppState,
    purpose: ClipboardPurpose,
    result: RequestResult<String>,
) -> UpdateResult {
    match (purpose, result) {
        (ClipboardPurpose::SmsPaste, Ok(text)) => {
            if text.trim().is_empty() {
                state.alert = Some(AlertState::info(
                    "Clipboard Empty",
                    "There is no text on the clipboard.",
                ));
            } else {
                state.sms.text.set(text);
            }
        }
        (ClipboardPurpose::SmsPaste, Err(e)) => {
            state.alert = Some(failure_alert(&e, "Error", "Could not read the clipboard."));
        }

        (ClipboardPurpose::SmsFill, Ok(text)) => {
            if state.view == View::Sms && !text.trim().is_empty() {
                state.sms.text.set(text.clone());
            }
            if state.settings.behavior.auto_scan_clipboard {
                return auto_scan_clipboard(state, &text);
            }
        }
        (ClipboardPurpose::SmsFill, Err(e)) => {
            debug!("Clipboard unavailable on resume: {}", e.message);
        }

        (ClipboardPurpose::AutoScan, Ok(text)) => return auto_scan_clipboard(state, &text),
        (ClipboardPurpose::AutoScan, Err(e)) => {
            debug!("Clipboard unavailable on resume: {}", e.message);
        }
    }
    UpdateResult::none()
}

fn auto_scan_clipboard(state: &mut AppState, text: &str) -> UpdateResult {
    match auto_scan_candidate(text, state.last_auto_scanned.as_deref()) {
        Some(url) => {
            info!("Auto-scanning copied link {}", url);
            state.last_auto_scanned = Some(url.clone());
            UpdateResult::action(UpdateAction::AutoScan { url })
        }
        None => UpdateResult::none(),
    }
}

/// Result of a background clipboard scan. Only threats interrupt the user,
/// and failures are logged.
pub fn handle_auto_scan_completed(
    state: &mut AppState,
    url: String,
    result: RequestResult<ScanOutcome>,
) -> UpdateResult {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Auto-scan of {} failed: {}", url, e.message);
            return UpdateResult::none();
        }
    };

    let echoed = if outcome.url.is_empty() {
        url.as_str()
    } else {
        outcome.url.as_str()
    };

    match threat_notification(&outcome, echoed) {
        Some((title, body)) if state.settings.behavior.notifications => {
            state.banner = Some(Banner::new(title, body.clone()));
            UpdateResult::action(UpdateAction::Notify {
                title: title.to_string(),
                body,
            })
        }
        Some(_) => {
            info!("Copied link {} is {}; notifications are off", echoed, outcome.result);
            UpdateResult::none()
        }
        None => {
            info!("Copied link {} is {}", echoed, outcome.result);
            UpdateResult::none()
        }
    }
}

pub fn handle_tick(state: &mut AppState) -> UpdateResult {
    if state.is_loading() {
        state.advance_spinner();
    }
    if state
        .banner
        .as_ref()
        .is_some_and(|b| b.is_expired(Instant::now()))
    {
        state.banner = None;
    }
    UpdateResult::none()
}

/// Apply a text edit to the focused input of the current view
pub fn handle_edit(state: &mut AppState, edit: TextEdit) -> UpdateResult {
    match state.view {
        View::Auth => state.auth.focused_mut().apply(edit),
        View::Home => state.home.url.apply(edit),
        View::Sms => state.sms.text.apply(edit),
        View::Qr => state.qr.path.apply(edit),
        View::Profile if state.profile.editing => state.profile.focused_mut().apply(edit),
        View::Profile | View::History => {}
    }
    UpdateResult::none()
}

pub fn handle_focus_change(state: &mut AppState) -> UpdateResult {
    match state.view {
        View::Auth => state.auth.toggle_focus(),
        View::Profile if state.profile.editing => state.profile.toggle_focus(),
        _ => {}
    }
    UpdateResult::none()
}
