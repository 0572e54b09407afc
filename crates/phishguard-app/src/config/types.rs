//! Configuration types for PhishGuard
//!
//! Every field has a default so a partial (or missing) `config.toml` works.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default production endpoint
pub const DEFAULT_SERVER_URL: &str = "https://phishguard-api-1-t6wy.onrender.com";

/// Global application settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Base URL; endpoint paths are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Scan history settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistorySettings {
    /// Maximum entries kept, oldest dropped first. `0` keeps everything.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> usize {
    500
}

/// Behavior settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Scan a URL found on the clipboard whenever the terminal regains focus
    #[serde(default = "default_true")]
    pub auto_scan_clipboard: bool,

    /// Desktop notification when a background scan finds a threat
    #[serde(default = "default_true")]
    pub notifications: bool,

    /// Ring the terminal bell for verdict feedback
    #[serde(default = "default_true")]
    pub haptics: bool,

    /// Settle delay between focus gained and the clipboard read
    #[serde(default = "default_resume_delay_ms")]
    pub resume_delay_ms: u64,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            auto_scan_clipboard: true,
            notifications: true,
            haptics: true,
            resume_delay_ms: default_resume_delay_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_resume_delay_ms() -> u64 {
    500
}

/// Icon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals (default)
    #[default]
    Unicode,
    /// Nerd Font glyphs; requires a Nerd Font installed in the terminal
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub icons: IconMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.server.base_url, DEFAULT_SERVER_URL);
        assert_eq!(s.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(s.history.max_entries, 500);
        assert!(s.behavior.auto_scan_clipboard);
        assert!(s.behavior.notifications);
        assert_eq!(s.behavior.resume_delay_ms, 500);
        assert_eq!(s.ui.icons, IconMode::Unicode);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let s: Settings = toml::from_str(
            r#"
            [server]
            request_timeout_secs = 5

            [behavior]
            notifications = false
            "#,
        )
        .unwrap();

        assert_eq!(s.server.base_url, DEFAULT_SERVER_URL);
        assert_eq!(s.server.request_timeout_secs, 5);
        assert!(!s.behavior.notifications);
        assert!(s.behavior.auto_scan_clipboard);
        assert_eq!(s.history.max_entries, 500);
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let server = ServerSettings {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(server.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_icon_mode_parse() {
        let s: Settings = toml::from_str("[ui]\nicons = \"nerd_fonts\"").unwrap();
        assert_eq!(s.ui.icons, IconMode::NerdFonts);
        assert_eq!(IconMode::NerdFonts.to_string(), "nerd_fonts");
    }
}
