//! Profile view handlers: session display, edit form, settings toggle

use phishguard_core::prelude::*;
use phishguard_core::{HistoryStats, UserSession};

use crate::confirm_dialog::AlertState;
use crate::message::{FailureKind, RequestId, RequestResult};
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

fn session_expired() -> AlertState {
    AlertState::error("Session Expired", "Please log out and log in again.")
}

pub fn handle_loaded(
    state: &mut AppState,
    session: Option<UserSession>,
    stats: RequestResult<HistoryStats>,
) -> UpdateResult {
    if session.is_none() {
        state.alert = Some(session_expired());
    }
    state.profile.session = session;
    state.profile.stats = match stats {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("Could not count history: {}", e.message);
            None
        }
    };
    state.profile.loaded = true;
    UpdateResult::none()
}

pub fn handle_toggle_edit(state: &mut AppState) -> UpdateResult {
    if state.profile.in_flight.is_some() {
        return UpdateResult::none();
    }
    if state.profile.editing {
        state.profile.editing = false;
    } else if state.profile.session.is_some() {
        state.profile.begin_edit();
    } else {
        state.alert = Some(session_expired());
    }
    UpdateResult::none()
}

pub fn handle_save(state: &mut AppState) -> UpdateResult {
    if state.profile.in_flight.is_some() || !state.profile.editing {
        return UpdateResult::none();
    }

    let Some(session) = state.profile.session.clone() else {
        state.alert = Some(session_expired());
        return UpdateResult::none();
    };
    if session.email.trim().is_empty() {
        state.alert = Some(AlertState::error(
            "Error",
            "User email is missing. Please Log Out and Log In again.",
        ));
        return UpdateResult::none();
    }

    let request = state.next_request_id();
    state.profile.in_flight = Some(request);
    UpdateResult::action(UpdateAction::UpdateProfile {
        request,
        session,
        name: state.profile.name.value().trim().to_string(),
        photo: state.profile.photo.value().trim().to_string(),
    })
}

pub fn handle_saved(
    state: &mut AppState,
    request: RequestId,
    result: RequestResult<UserSession>,
) -> UpdateResult {
    if state.profile.in_flight != Some(request) {
        debug!("Discarding stale profile update {:?}", request);
        return UpdateResult::none();
    }
    state.profile.in_flight = None;

    match result {
        Ok(session) => {
            state.profile.session = Some(session);
            state.profile.editing = false;
            state.alert = Some(AlertState::success(
                "Success",
                "Profile updated successfully!",
            ));
        }
        Err(e) => {
            state.alert = Some(match e.kind {
                FailureKind::Capability => AlertState::error("Permission Required", e.message),
                FailureKind::Validation => AlertState::error("Error", e.message),
                FailureKind::Server | FailureKind::Storage => {
                    AlertState::error("Save Failed", e.message)
                }
                _ => AlertState::error("Save Failed", "Could not connect to server."),
            });
        }
    }
    UpdateResult::none()
}

pub fn handle_toggle_notifications(state: &mut AppState) -> UpdateResult {
    let behavior = &mut state.settings.behavior;
    behavior.notifications = !behavior.notifications;
    info!(
        "Threat notifications {}",
        if behavior.notifications { "enabled" } else { "disabled" }
    );
    UpdateResult::action(UpdateAction::SaveSettings {
        settings: state.settings.clone(),
    })
}

pub fn handle_settings_saved(state: &mut AppState, result: RequestResult<()>) -> UpdateResult {
    if let Err(e) = result {
        warn!("Failed to save settings: {}", e.message);
        state.alert = Some(AlertState::error(
            "Settings Not Saved",
            format!("The change applies to this session only: {}", e.message),
        ));
    }
    UpdateResult::none()
}
