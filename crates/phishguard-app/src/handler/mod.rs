//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per view and overlay
//! - `lifecycle`: Navigation, resume, clipboard and background scans
//! - `auth`: Login / registration form
//! - `scan`: Home, SMS and QR submissions and their results
//! - `history`: History list and clearing
//! - `profile`: Profile view, editing and settings toggles
//! - `overlay`: Alerts, confirmation dialogs and result modals
//! - `helpers`: Error-to-alert mapping

pub(crate) mod auth;
pub(crate) mod helpers;
pub(crate) mod history;
pub(crate) mod keys;
pub(crate) mod lifecycle;
pub(crate) mod overlay;
pub(crate) mod profile;
pub(crate) mod scan;
pub(crate) mod update;


use std::time::Duration;

use phishguard_core::{AuthMode, HapticPattern, UserSession};

use crate::config::Settings;
use crate::message::{ClipboardPurpose, Message, RequestId};
use crate::navigation::View;
use crate::workflow::RecordAs;

// Re-export main entry point
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Classify a URL for `view`; reported as `Message::ScanCompleted`
    Scan {
        view: View,
        request: RequestId,
        url: String,
        record: RecordAs,
    },

    /// Background scan of a clipboard link; never recorded in history
    AutoScan { url: String },

    /// Decode the QR code in an image file
    DecodeQr { request: RequestId, path: String },

    Authenticate {
        request: RequestId,
        mode: AuthMode,
        email: String,
        password: String,
    },

    UpdateProfile {
        request: RequestId,
        session: UserSession,
        name: String,
        photo: String,
    },

    /// Read the clipboard after `delay`
    ReadClipboard {
        purpose: ClipboardPurpose,
        delay: Duration,
    },

    LoadHistory,
    ClearHistory,
    LoadProfile,

    /// Delete the cached session (logout)
    RemoveSession,

    SaveSettings { settings: Settings },

    /// Desktop notification
    Notify { title: String, body: String },

    PlayHaptic(HapticPattern),

    /// Abort every task started on behalf of `view`
    CancelViewTasks { view: View },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn action_then(action: UpdateAction, msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}
