//! Confirm dialog, alert and result-modal state.
//!
//! Data models for the overlays. The rendering widgets live in
//! `phishguard-tui`.

use phishguard_core::{Presentation, ScanOutcome};

use crate::message::{ConfirmAction, Message};
use crate::navigation::{NavAction, View};

#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    pub options: Vec<(String, Message)>,
    pub selected: usize,
}

impl ConfirmDialogState {
    /// Create a generic confirmation dialog
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
            selected: 0,
        }
    }

    pub fn for_action(action: ConfirmAction) -> Self {
        match action {
            ConfirmAction::ClearHistory => Self::new(
                "Clear History",
                "Delete all records?",
                vec![
                    ("Cancel", Message::ConfirmCancel),
                    ("Delete", Message::ClearHistoryConfirmed),
                ],
            ),
            ConfirmAction::Logout => Self::new(
                "Sign Out",
                "Are you sure?",
                vec![
                    ("Cancel", Message::ConfirmCancel),
                    ("Log Out", Message::Navigate(NavAction::Open(View::Auth))),
                ],
            ),
        }
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn selected_message(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, m)| m.clone())
    }
}

/// Colour family of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTone {
    Info,
    Success,
    Error,
    /// Verdict alert for a dangerous URL
    Danger,
}

/// Modal message with a single dismiss button
#[derive(Debug, Clone)]
pub struct AlertState {
    pub title: String,
    pub body: String,
    pub tone: AlertTone,
    /// Dispatched after the alert is dismissed
    pub on_dismiss: Option<Box<Message>>,
    /// Label of the dismiss button
    pub button: String,
}

impl AlertState {
    pub fn new(title: impl Into<String>, body: impl Into<String>, tone: AlertTone) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tone,
            on_dismiss: None,
            button: "OK".to_string(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body, AlertTone::Info)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body, AlertTone::Error)
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body, AlertTone::Success)
    }

    pub fn then(mut self, button: &str, message: Message) -> Self {
        self.button = button.to_string();
        self.on_dismiss = Some(Box::new(message));
        self
    }
}

/// Verdict modal shown by the Home and QR views
#[derive(Debug, Clone)]
pub struct ResultModal {
    pub outcome: ScanOutcome,
    pub presentation: Presentation,
    /// URL that was submitted
    pub url: String,
    pub options: Vec<(String, Message)>,
    pub selected: usize,
}

impl ResultModal {
    pub fn new(
        outcome: ScanOutcome,
        presentation: Presentation,
        url: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            outcome,
            presentation,
            url: url.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn selected_message(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, m)| m.clone())
    }
}
