//! Main update function - handles state transitions (TEA pattern)

use crate::message::{ClipboardPurpose, Message};
use crate::state::{AppPhase, AppState};

use super::{
    auth, history, keys::handle_key, lifecycle, overlay, profile, scan, UpdateAction,
    UpdateResult,
};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => lifecycle::handle_tick(state),
        Message::Resumed => lifecycle::handle_resumed(state),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::Navigate(action) => lifecycle::handle_navigate(state, action),
        Message::ViewEntered { view, logout } => {
            lifecycle::handle_view_entered(state, view, logout)
        }

        // ─────────────────────────────────────────────────────────
        // Overlays and forms
        // ─────────────────────────────────────────────────────────
        Message::DismissAlert => overlay::handle_dismiss_alert(state),
        Message::RequestConfirm(action) => overlay::handle_request_confirm(state, action),
        Message::ConfirmNext => overlay::handle_confirm_next(state),
        Message::ConfirmAccept => overlay::handle_confirm_accept(state),
        Message::ConfirmCancel => overlay::handle_confirm_cancel(state),
        Message::ModalNext => overlay::handle_modal_next(state),
        Message::ModalAccept => overlay::handle_modal_accept(state),

        Message::Edit(edit) => lifecycle::handle_edit(state, edit),
        Message::FocusNext | Message::FocusPrevious => lifecycle::handle_focus_change(state),

        // ─────────────────────────────────────────────────────────
        // Auth
        // ─────────────────────────────────────────────────────────
        Message::AuthToggleMode => auth::handle_toggle_mode(state),
        Message::AuthSubmit => auth::handle_submit(state),
        Message::AuthCompleted { request, result } => {
            auth::handle_completed(state, request, result)
        }

        // ─────────────────────────────────────────────────────────
        // Scanning
        // ─────────────────────────────────────────────────────────
        Message::HomeSubmit => scan::handle_home_submit(state),
        Message::HomeCloseResult => scan::handle_home_close_result(state),
        Message::SmsSubmit => scan::handle_sms_submit(state),
        Message::SmsPaste => UpdateResult::action(UpdateAction::ReadClipboard {
            purpose: ClipboardPurpose::SmsPaste,
            delay: std::time::Duration::ZERO,
        }),
        Message::SmsClear => {
            state.sms.text.clear();
            UpdateResult::none()
        }
        Message::QrSubmit => scan::handle_qr_submit(state),
        Message::QrDecoded { request, result } => scan::handle_qr_decoded(state, request, result),
        Message::QrScanNext => scan::handle_qr_scan_next(state),
        Message::ScanCompleted {
            view,
            request,
            url,
            result,
            recorded,
        } => scan::handle_scan_completed(state, view, request, url, result, recorded),
        Message::Haptic(pattern) => scan::handle_haptic(state, pattern),

        // ─────────────────────────────────────────────────────────
        // Clipboard / background scan
        // ─────────────────────────────────────────────────────────
        Message::ClipboardRead { purpose, result } => {
            lifecycle::handle_clipboard_read(state, purpose, result)
        }
        Message::AutoScanCompleted { url, result } => {
            lifecycle::handle_auto_scan_completed(state, url, result)
        }

        // ─────────────────────────────────────────────────────────
        // History
        // ─────────────────────────────────────────────────────────
        Message::HistoryRefresh => history::handle_refresh(state),
        Message::HistoryLoaded { result } => history::handle_loaded(state, result),
        Message::HistorySelectNext => {
            state.history.select_next();
            UpdateResult::none()
        }
        Message::HistorySelectPrevious => {
            state.history.select_previous();
            UpdateResult::none()
        }
        Message::ClearHistoryConfirmed => history::handle_clear_confirmed(state),
        Message::HistoryCleared { result } => history::handle_cleared(state, result),

        // ─────────────────────────────────────────────────────────
        // Profile
        // ─────────────────────────────────────────────────────────
        Message::ProfileLoaded { session, stats } => profile::handle_loaded(state, session, stats),
        Message::ProfileToggleEdit => profile::handle_toggle_edit(state),
        Message::ProfileSave => profile::handle_save(state),
        Message::ProfileSaved { request, result } => profile::handle_saved(state, request, result),
        Message::ToggleNotifications => profile::handle_toggle_notifications(state),
        Message::SettingsSaved { result } => profile::handle_settings_saved(state, result),
    }
}
