//! Main render/view function (View in TEA pattern)


mod screens;

use phishguard_app::navigation::View;
use phishguard_app::state::AppState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::{icons::IconSet, palette};
use crate::widgets::modal_overlay;

/// Key hints for whatever currently takes input
pub fn key_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    if state.confirm.is_some() {
        return &[("←/→", "Choose"), ("Enter", "Confirm"), ("Esc", "Cancel")];
    }
    if state.alert.is_some() {
        return &[("Enter", "Dismiss")];
    }
    if state.result_modal().is_some() {
        return &[("←/→", "Choose"), ("Enter", "Select"), ("Esc", "Close")];
    }
    match state.view {
        View::Auth => &[
            ("Tab", "Next field"),
            ("Enter", "Submit"),
            ("Ctrl+T", "Login/Sign Up"),
            ("Ctrl+C", "Quit"),
        ],
        View::Home => &[
            ("Enter", "Scan"),
            ("Tab", "Next view"),
            ("F1-F5", "Views"),
            ("Ctrl+C", "Quit"),
        ],
        View::Sms => &[
            ("Enter", "Scan"),
            ("Ctrl+V", "Paste"),
            ("Ctrl+X", "Clear"),
            ("Esc", "Back"),
        ],
        View::Qr => &[("Enter", "Scan"), ("Tab", "Next view"), ("Esc", "Back")],
        View::History => &[
            ("↑/↓", "Select"),
            ("r", "Refresh"),
            ("c", "Clear All"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
        View::Profile if state.profile.editing => &[
            ("Tab", "Next field"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
        View::Profile => &[
            ("e", "Edit"),
            ("n", "Notifications"),
            ("l", "Log Out"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
    }
}

/// What the spinner stands for on the active view
fn busy_label(state: &AppState) -> &'static str {
    match state.view {
        View::Auth => "Signing in...",
        View::Qr => "Checking code...",
        View::History => "Loading...",
        View::Profile => "Saving...",
        View::Home | View::Sms => "Scanning...",
    }
}

/// Render the complete UI (View in TEA)
///
/// Pure with respect to `state`; animation comes from `state.spinner_frame`.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let icons = IconSet::new(state.settings.ui.icons);
    let areas = layout::create(area, state.view != View::Auth);

    frame.render_widget(
        widgets::MainHeader::new(state.view, icons)
            .auto_scan(state.settings.behavior.auto_scan_clipboard),
        areas.header,
    );

    match state.view {
        View::Auth => screens::auth(frame, areas.body, state, icons),
        View::Home => screens::home(frame, areas.body, state, icons),
        View::Sms => screens::sms(frame, areas.body, state, icons),
        View::Qr => screens::qr(frame, areas.body, state, icons),
        View::History => screens::history(frame, areas.body, state, icons),
        View::Profile => screens::profile(frame, areas.body, state, icons),
    }

    let mut status = widgets::StatusBar::new(key_hints(state));
    if state.is_loading() {
        status = status.busy(icons.spinner(state.spinner_frame), busy_label(state));
    }
    frame.render_widget(status, areas.footer);

    render_overlays(frame, state, icons);

    if let Some(banner) = &state.banner {
        frame.render_widget(widgets::NotificationBanner::new(banner, icons), area);
    }
}

/// Result modal, alert and confirmation dialog, bottom to top
fn render_overlays(frame: &mut Frame, state: &AppState, icons: IconSet) {
    let modal = state.result_modal();
    if modal.is_none() && !state.has_overlay() {
        return;
    }

    let area = frame.area();
    modal_overlay::dim_background(frame.buffer_mut(), area);

    if let Some(modal) = modal {
        frame.render_widget(widgets::ScanResultModal::new(modal, icons), area);
    }
    if let Some(alert) = &state.alert {
        frame.render_widget(widgets::AlertDialog::new(alert), area);
    }
    if let Some(confirm) = &state.confirm {
        frame.render_widget(widgets::ConfirmDialog::new(confirm), area);
    }
}
