//! Alert, confirmation dialog and result modal handlers

use crate::confirm_dialog::ConfirmDialogState;
use crate::message::{ConfirmAction, Message};
use crate::state::AppState;

use super::UpdateResult;

fn follow_up(msg: Option<Message>) -> UpdateResult {
    match msg {
        Some(msg) => UpdateResult::message(msg),
        None => UpdateResult::none(),
    }
}

pub fn handle_dismiss_alert(state: &mut AppState) -> UpdateResult {
    let next = state.alert.take().and_then(|a| a.on_dismiss).map(|m| *m);
    follow_up(next)
}

pub fn handle_request_confirm(state: &mut AppState, action: ConfirmAction) -> UpdateResult {
    state.confirm = Some(ConfirmDialogState::for_action(action));
    UpdateResult::none()
}

pub fn handle_confirm_next(state: &mut AppState) -> UpdateResult {
    if let Some(dialog) = state.confirm.as_mut() {
        dialog.select_next();
    }
    UpdateResult::none()
}

pub fn handle_confirm_accept(state: &mut AppState) -> UpdateResult {
    let next = state.confirm.take().and_then(|d| d.selected_message());
    follow_up(next)
}

pub fn handle_confirm_cancel(state: &mut AppState) -> UpdateResult {
    state.confirm = None;
    UpdateResult::none()
}

pub fn handle_modal_next(state: &mut AppState) -> UpdateResult {
    if let Some(modal) = state.result_modal_mut() {
        modal.select_next();
    }
    UpdateResult::none()
}

pub fn handle_modal_accept(state: &mut AppState) -> UpdateResult {
    let next = state.result_modal().and_then(|m| m.selected_message());
    follow_up(next)
}
