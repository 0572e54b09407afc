//! Desktop notifications

use std::process::Stdio;

use phishguard_core::prelude::*;
use tokio::process::Command;

/// Which notifier binary to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierKind {
    /// freedesktop `notify-send`
    NotifySend,
    /// macOS `osascript -e 'display notification ...'`
    Osascript,
}

impl NotifierKind {
    fn program(self) -> &'static str {
        match self {
            NotifierKind::NotifySend => "notify-send",
            NotifierKind::Osascript => "osascript",
        }
    }

    fn args(self, title: &str, body: &str) -> Vec<String> {
        match self {
            NotifierKind::NotifySend => vec![
                "--app-name=PhishGuard".to_string(),
                "--urgency=critical".to_string(),
                title.to_string(),
                body.to_string(),
            ],
            NotifierKind::Osascript => vec![
                "-e".to_string(),
                format!(
                    "display notification {} with title {}",
                    applescript_quote(body),
                    applescript_quote(title)
                ),
            ],
        }
    }
}

fn applescript_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Sends local notifications. Every notification is logged; it is also
/// shown on the desktop when a notifier tool exists.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    kind: Option<NotifierKind>,
}

impl Notifier {
    pub fn detect() -> Self {
        let preferred = if cfg!(target_os = "macos") {
            [NotifierKind::Osascript, NotifierKind::NotifySend]
        } else {
            [NotifierKind::NotifySend, NotifierKind::Osascript]
        };

        let kind = preferred
            .into_iter()
            .find(|k| which::which(k.program()).is_ok());
        debug!("Desktop notifier: {:?}", kind);
        Self { kind }
    }

    /// Notifier that only logs
    pub fn log_only() -> Self {
        Self { kind: None }
    }

    pub fn has_desktop(&self) -> bool {
        self.kind.is_some()
    }

    /// Send a notification immediately.
    ///
    /// Returns whether it reached the desktop. A failing notifier is logged
    /// and reported as `false`, never as an error.
    pub async fn notify(&self, title: &str, body: &str) -> bool {
        warn!("Notification: {} - {}", title, body);

        let Some(kind) = self.kind else {
            return false;
        };

        match Command::new(kind.program())
            .args(kind.args(title, body))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) if status.success() => true,
            Ok(status) => {
                debug!("{} exited with {}", kind.program(), status);
                false
            }
            Err(e) => {
                debug!("Failed to run {}: {}", kind.program(), e);
                false
            }
        }
    }
}
