//! Login / registration form handlers

use phishguard_client::AuthSuccess;
use phishguard_core::prelude::*;
use phishguard_core::validate_credentials;

use crate::confirm_dialog::AlertState;
use crate::message::{FailureKind, Message, RequestId, RequestResult};
use crate::navigation::NavAction;
use crate::state::AppState;

use super::helpers::validation_alert;
use super::{UpdateAction, UpdateResult};

pub fn handle_toggle_mode(state: &mut AppState) -> UpdateResult {
    if state.auth.in_flight.is_none() {
        state.auth.mode = state.auth.mode.toggle();
    }
    UpdateResult::none()
}

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if state.auth.in_flight.is_some() {
        return UpdateResult::none();
    }

    let email = state.auth.email.value().trim().to_string();
    let password = state.auth.password.value().to_string();
    let mode = state.auth.mode;

    if let Err(e) = validate_credentials(&email, &password, mode) {
        state.alert = Some(validation_alert(&e));
        return UpdateResult::none();
    }

    let request = state.next_request_id();
    state.auth.in_flight = Some(request);
    UpdateResult::action(UpdateAction::Authenticate {
        request,
        mode,
        email,
        password,
    })
}

pub fn handle_completed(
    state: &mut AppState,
    request: RequestId,
    result: RequestResult<AuthSuccess>,
) -> UpdateResult {
    if state.auth.in_flight != Some(request) {
        debug!("Discarding stale auth result {:?}", request);
        return UpdateResult::none();
    }
    state.auth.in_flight = None;

    match result {
        Ok(success) => {
            state.alert = Some(AlertState::success("Success", success.message));
            UpdateResult::message(Message::Navigate(NavAction::LoginSucceeded))
        }
        Err(e) => {
            state.alert = Some(match e.kind {
                FailureKind::Connectivity => {
                    AlertState::error("Connection Error", "Could not connect to server.")
                }
                _ => AlertState::error("Error", e.message),
            });
            UpdateResult::none()
        }
    }
}
