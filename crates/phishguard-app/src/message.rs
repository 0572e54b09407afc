//! Message types for the application (TEA pattern)

use phishguard_client::AuthSuccess;
use phishguard_core::{Error, HapticPattern, HistoryEntry, HistoryStats, ScanOutcome, UserSession};

use crate::input_key::InputKey;
use crate::navigation::{NavAction, View};
use crate::text_field::TextEdit;

/// Identifies one submission so late results for a cancelled or
/// superseded request can be discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(pub u64);

/// Error taxonomy as seen by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Input rejected before any request
    Validation,
    /// The service answered with a failure
    Server,
    /// No answer: refused, DNS, TLS, timeout
    Connectivity,
    /// Clipboard tool, image file or other local capability unavailable
    Capability,
    /// Image read but no QR code in it
    Decode,
    /// Local store failure
    Storage,
    Cancelled,
}

/// Cloneable summary of an [`Error`] carried in messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of a background task as carried in a [`Message`]
pub type RequestResult<T> = std::result::Result<T, RequestError>;

impl RequestError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&Error> for RequestError {
    fn from(err: &Error) -> Self {
        let (kind, message) = match err {
            Error::Validation { message, .. } => (FailureKind::Validation, message.clone()),
            Error::Server { message, .. } => (FailureKind::Server, message.clone()),
            Error::Connection { .. } | Error::Timeout { .. } => {
                (FailureKind::Connectivity, err.to_string())
            }
            Error::Capability { reason, .. } => (FailureKind::Capability, reason.clone()),
            Error::QrDecode { message } => (FailureKind::Decode, message.clone()),
            Error::Cancelled => (FailureKind::Cancelled, err.to_string()),
            _ => (FailureKind::Storage, err.to_string()),
        };
        Self { kind, message }
    }
}

impl From<Error> for RequestError {
    fn from(err: Error) -> Self {
        RequestError::from(&err)
    }
}

/// Why the clipboard is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardPurpose {
    /// Explicit paste into the SMS text area
    SmsPaste,
    /// Resume while on the SMS view: fill the text area if there is text
    SmsFill,
    /// Resume elsewhere: scan the first URL found
    AutoScan,
}

/// Confirmable destructive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearHistory,
    Logout,
}

/// All possible messages/events in the application
#[derive(Debug, Clone)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Input / lifecycle
    // ─────────────────────────────────────────────────────────
    Key(InputKey),
    Tick,
    Quit,
    /// The terminal regained focus ("app became active")
    Resumed,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    Navigate(NavAction),
    /// Follow-up of a view change
    ViewEntered { view: View, logout: bool },

    // ─────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────
    DismissAlert,
    RequestConfirm(ConfirmAction),
    ConfirmNext,
    ConfirmAccept,
    ConfirmCancel,
    /// Move the selection in the result modal of the current view
    ModalNext,
    ModalAccept,

    /// Edit the focused text field of the current view
    Edit(TextEdit),
    /// Move focus to the next field of the current form
    FocusNext,
    FocusPrevious,

    // ─────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────
    AuthToggleMode,
    AuthSubmit,
    AuthCompleted {
        request: RequestId,
        result: RequestResult<AuthSuccess>,
    },

    // ─────────────────────────────────────────────────────────
    // Scanning (Home / SMS / QR)
    // ─────────────────────────────────────────────────────────
    HomeSubmit,
    HomeCloseResult,
    SmsSubmit,
    SmsPaste,
    SmsClear,
    QrSubmit,
    QrDecoded {
        request: RequestId,
        result: RequestResult<String>,
    },
    /// Re-arm the QR latch after a result or a rejected code
    QrScanNext,
    ScanCompleted {
        view: View,
        request: RequestId,
        url: String,
        result: RequestResult<ScanOutcome>,
        /// Outcome of the history write, when one was attempted
        recorded: Option<RequestResult<HistoryEntry>>,
    },
    Haptic(HapticPattern),

    // ─────────────────────────────────────────────────────────
    // Clipboard / background scan
    // ─────────────────────────────────────────────────────────
    ClipboardRead {
        purpose: ClipboardPurpose,
        result: RequestResult<String>,
    },
    AutoScanCompleted {
        url: String,
        result: RequestResult<ScanOutcome>,
    },

    // ─────────────────────────────────────────────────────────
    // History
    // ─────────────────────────────────────────────────────────
    HistoryRefresh,
    HistoryLoaded {
        result: RequestResult<Vec<HistoryEntry>>,
    },
    HistorySelectNext,
    HistorySelectPrevious,
    ClearHistoryConfirmed,
    HistoryCleared {
        result: RequestResult<()>,
    },

    // ─────────────────────────────────────────────────────────
    // Profile
    // ─────────────────────────────────────────────────────────
    ProfileLoaded {
        session: Option<UserSession>,
        stats: RequestResult<HistoryStats>,
    },
    ProfileToggleEdit,
    ProfileSave,
    ProfileSaved {
        request: RequestId,
        result: RequestResult<UserSession>,
    },
    ToggleNotifications,
    SettingsSaved {
        result: RequestResult<()>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_classification() {
        let e = RequestError::from(Error::Timeout { secs: 30 });
        assert_eq!(e.kind, FailureKind::Connectivity);

        let e = RequestError::from(Error::server(Some(200), "Model offline"));
        assert_eq!(e, RequestError::new(FailureKind::Server, "Model offline"));

        let e = RequestError::from(Error::capability("Clipboard", "no tool"));
        assert_eq!(e.kind, FailureKind::Capability);
        assert_eq!(e.message, "no tool");

        let e = RequestError::from(Error::store("scanHistory", "locked"));
        assert_eq!(e.kind, FailureKind::Storage);
    }
}
