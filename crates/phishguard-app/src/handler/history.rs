//! History list handlers

use phishguard_core::prelude::*;
use phishguard_core::{HistoryEntry, HistoryStats};

use crate::confirm_dialog::AlertState;
use crate::message::RequestResult;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    if state.history.loading {
        return UpdateResult::none();
    }
    state.history.loading = true;
    UpdateResult::action(UpdateAction::LoadHistory)
}

pub fn handle_loaded(
    state: &mut AppState,
    result: RequestResult<Vec<HistoryEntry>>,
) -> UpdateResult {
    state.history.loading = false;
    match result {
        Ok(entries) => {
            debug!("Loaded {} history entries", entries.len());
            state.history.selected = state
                .history
                .selected
                .min(entries.len().saturating_sub(1));
            state.history.entries = entries;
            state.history.error = None;
        }
        Err(e) => {
            warn!("Failed to load history: {}", e.message);
            state.history.error = Some(e.message);
        }
    }
    UpdateResult::none()
}

pub fn handle_clear_confirmed(state: &mut AppState) -> UpdateResult {
    state.confirm = None;
    UpdateResult::action(UpdateAction::ClearHistory)
}

pub fn handle_cleared(state: &mut AppState, result: RequestResult<()>) -> UpdateResult {
    match result {
        Ok(()) => {
            state.history.entries.clear();
            state.history.selected = 0;
            if state.profile.loaded {
                state.profile.stats = Some(HistoryStats::default());
            }
        }
        Err(e) => {
            state.alert = Some(AlertState::error("Error", e.message));
        }
    }
    UpdateResult::none()
}
