//! Home, SMS and QR scan handlers
//!
//! Every view keeps its own in-flight request id. A submission is ignored
//! while one is outstanding, and a completion whose id does not match is
//! dropped.

use phishguard_core::prelude::*;
use phishguard_core::{
    extract_url, looks_like_web_url, present, sms_alert_body, HapticPattern, HistoryEntry,
    ScanOutcome, ScanSource,
};

use crate::confirm_dialog::{AlertState, AlertTone, ResultModal};
use crate::message::{Message, RequestId, RequestResult};
use crate::navigation::{NavAction, View};
use crate::state::AppState;
use crate::workflow::RecordAs;

use super::helpers::failure_alert;
use super::{UpdateAction, UpdateResult};

/// Vibration when a QR code is taken
const QR_TAKEN_PULSE_MS: u64 = 100;

pub fn handle_home_submit(state: &mut AppState) -> UpdateResult {
    if state.home.in_flight.is_some() || state.home.result.is_some() {
        return UpdateResult::none();
    }

    let url = state.home.url.value();
    if url.trim().is_empty() {
        state.alert = Some(AlertState::error(
            "Empty URL",
            "Please enter a website address first.",
        ));
        return UpdateResult::none();
    }
    let url = url.to_string();

    let request = state.next_request_id();
    state.home.in_flight = Some(request);
    UpdateResult::action(UpdateAction::Scan {
        view: View::Home,
        request,
        url,
        record: RecordAs::Echo,
    })
}

pub fn handle_home_close_result(state: &mut AppState) -> UpdateResult {
    state.home.result = None;
    state.home.url.clear();
    UpdateResult::none()
}

pub fn handle_sms_submit(state: &mut AppState) -> UpdateResult {
    if state.sms.in_flight.is_some() {
        return UpdateResult::none();
    }

    let text = state.sms.text.value();
    if text.trim().is_empty() {
        state.alert = Some(AlertState::error("Empty", "Please paste an SMS message first."));
        return UpdateResult::none();
    }

    let Some(url) = extract_url(text) else {
        state.alert = Some(AlertState::error(
            "No Link Found",
            "This message doesn't contain a recognizable link.",
        ));
        return UpdateResult::none();
    };

    let request = state.next_request_id();
    state.sms.in_flight = Some(request);
    UpdateResult::action(UpdateAction::Scan {
        view: View::Sms,
        request,
        url,
        record: RecordAs::Echo,
    })
}

pub fn handle_qr_submit(state: &mut AppState) -> UpdateResult {
    if state.qr.scanned || state.qr.in_flight.is_some() || state.qr.result.is_some() {
        return UpdateResult::none();
    }

    let path = state.qr.path.value().trim().to_string();
    if path.is_empty() {
        state.alert = Some(AlertState::error(
            "No Image",
            "Enter the path of an image containing a QR code.",
        ));
        return UpdateResult::none();
    }

    let request = state.next_request_id();
    state.qr.scanned = true;
    state.qr.in_flight = Some(request);
    UpdateResult::action_then(
        UpdateAction::DecodeQr { request, path },
        Message::Haptic(HapticPattern::Pulse(QR_TAKEN_PULSE_MS)),
    )
}

pub fn handle_qr_decoded(
    state: &mut AppState,
    request: RequestId,
    result: RequestResult<String>,
) -> UpdateResult {
    if state.qr.in_flight != Some(request) {
        debug!("Discarding stale QR decode {:?}", request);
        return UpdateResult::none();
    }

    match result {
        Ok(payload) if looks_like_web_url(&payload) => UpdateResult::action(UpdateAction::Scan {
            view: View::Qr,
            request,
            url: payload,
            record: RecordAs::Submitted,
        }),
        Ok(payload) => {
            state.qr.in_flight = None;
            state.alert = Some(
                AlertState::error(
                    "Not a Website",
                    format!("The scanned code is not a website URL:\n{}", payload),
                )
                .then("Scan Again", Message::QrScanNext),
            );
            UpdateResult::none()
        }
        Err(e) => {
            state.qr.in_flight = None;
            state.alert = Some(
                failure_alert(&e, "Error", "Could not read a QR code from that image.")
                    .then("OK", Message::QrScanNext),
            );
            UpdateResult::none()
        }
    }
}

pub fn handle_qr_scan_next(state: &mut AppState) -> UpdateResult {
    state.qr.scanned = false;
    state.qr.result = None;
    UpdateResult::none()
}

pub fn handle_scan_completed(
    state: &mut AppState,
    view: View,
    request: RequestId,
    url: String,
    result: RequestResult<ScanOutcome>,
    recorded: Option<RequestResult<HistoryEntry>>,
) -> UpdateResult {
    if state.in_flight(view) != Some(request) {
        debug!("Discarding stale scan result for {} ({:?})", url, request);
        return UpdateResult::none();
    }
    clear_in_flight(state, view);

    if let Some(Err(e)) = &recorded {
        warn!("Verdict for {} shown but not saved to history: {}", url, e.message);
    }

    match result {
        Ok(outcome) => show_outcome(state, view, url, outcome),
        Err(e) => {
            warn!("Scan of {} failed: {}", url, e.message);
            state.alert = Some(match view {
                View::Sms => failure_alert(&e, "Connection Failed", "Backend is unreachable."),
                View::Qr => failure_alert(&e, "Error", "Could not connect to scanner server.")
                    .then("OK", Message::QrScanNext),
                _ => failure_alert(
                    &e,
                    "Connection Error",
                    "Check your server IP and ensure it's running.",
                ),
            });
            UpdateResult::none()
        }
    }
}

fn clear_in_flight(state: &mut AppState, view: View) {
    match view {
        View::Home => state.home.in_flight = None,
        View::Sms => state.sms.in_flight = None,
        View::Qr => state.qr.in_flight = None,
        _ => {}
    }
}

fn show_outcome(state: &mut AppState, view: View, url: String, outcome: ScanOutcome) -> UpdateResult {
    info!("{} -> {}", url, outcome.result);

    match view {
        View::Sms => {
            let presentation = present(&outcome.result, ScanSource::Sms);
            let tone = if presentation.is_safe() {
                AlertTone::Success
            } else {
                AlertTone::Danger
            };
            state.alert = Some(AlertState::new(
                presentation.title,
                sms_alert_body(&outcome),
                tone,
            ));
            UpdateResult::message(Message::Haptic(presentation.haptic))
        }
        View::Qr => {
            let presentation = present(&outcome.result, ScanSource::Qr);
            // The taken pulse already played; only danger vibrates again
            let haptic = (!presentation.is_safe()).then(|| presentation.haptic.clone());
            state.qr.result = Some(ResultModal::new(
                outcome,
                presentation,
                url,
                vec![
                    ("SCAN NEXT", Message::QrScanNext),
                    ("Back to Home", Message::Navigate(NavAction::Open(View::Home))),
                ],
            ));
            match haptic {
                Some(pattern) => UpdateResult::message(Message::Haptic(pattern)),
                None => UpdateResult::none(),
            }
        }
        _ => {
            let presentation = present(&outcome.result, ScanSource::Url);
            let haptic = presentation.haptic.clone();
            state.home.result = Some(ResultModal::new(
                outcome,
                presentation,
                url,
                vec![("CLOSE", Message::HomeCloseResult)],
            ));
            UpdateResult::message(Message::Haptic(haptic))
        }
    }
}

pub fn handle_haptic(state: &mut AppState, pattern: HapticPattern) -> UpdateResult {
    if state.settings.behavior.haptics {
        UpdateResult::action(UpdateAction::PlayHaptic(pattern))
    } else {
        UpdateResult::none()
    }
}
