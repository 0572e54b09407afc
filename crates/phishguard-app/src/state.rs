//! Application state (Model in TEA pattern)

use std::time::{Duration, Instant};

use phishguard_core::{AuthMode, HistoryEntry, HistoryStats, UserSession};

use crate::config::Settings;
use crate::confirm_dialog::{AlertState, ConfirmDialogState, ResultModal};
use crate::message::RequestId;
use crate::navigation::View;
use crate::text_field::TextField;

/// How long a notification banner stays on screen
pub const BANNER_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-view state
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub email: TextField,
    pub password: TextField,
    pub mode: AuthMode,
    pub focus: AuthField,
    pub in_flight: Option<RequestId>,
}

impl AuthState {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub url: TextField,
    pub in_flight: Option<RequestId>,
    pub result: Option<ResultModal>,
}

#[derive(Debug, Clone, Default)]
pub struct SmsState {
    pub text: TextField,
    pub in_flight: Option<RequestId>,
}

#[derive(Debug, Clone, Default)]
pub struct QrState {
    /// Path of the image to decode
    pub path: TextField,
    pub in_flight: Option<RequestId>,
    /// Set when a code is taken; further codes are ignored until re-armed
    pub scanned: bool,
    pub result: Option<ResultModal>,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub entries: Vec<HistoryEntry>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl HistoryState {
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Photo,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub session: Option<UserSession>,
    pub stats: Option<HistoryStats>,
    /// Set once the first load finished
    pub loaded: bool,
    pub editing: bool,
    pub name: TextField,
    pub photo: TextField,
    pub focus: ProfileField,
    pub in_flight: Option<RequestId>,
}

impl ProfileState {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Photo => &mut self.photo,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ProfileField::Name => ProfileField::Photo,
            ProfileField::Photo => ProfileField::Name,
        };
    }

    /// Enter edit mode with the inputs prefilled from the session
    pub fn begin_edit(&mut self) {
        let (name, photo) = match &self.session {
            Some(s) => (
                s.name.clone().unwrap_or_default(),
                s.photo.clone().unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        self.name.set(name);
        self.photo.set(photo);
        self.focus = ProfileField::Name;
        self.editing = true;
    }
}

/// Transient notice shown on top of the current view
#[derive(Debug, Clone)]
pub struct Banner {
    pub title: String,
    pub body: String,
    pub expires_at: Instant,
}

impl Banner {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            expires_at: Instant::now() + BANNER_TTL,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: AppPhase,
    pub view: View,
    pub settings: Settings,

    pub auth: AuthState,
    pub home: HomeState,
    pub sms: SmsState,
    pub qr: QrState,
    pub history: HistoryState,
    pub profile: ProfileState,

    /// Modal message; takes all input until dismissed
    pub alert: Option<AlertState>,
    /// Confirmation dialog; takes all input until answered
    pub confirm: Option<ConfirmDialogState>,
    pub banner: Option<Banner>,

    /// Last link submitted by the clipboard auto-scan
    pub last_auto_scanned: Option<String>,

    next_request: u64,
    /// Spinner animation frame, advanced on every tick
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Request id currently in flight for `view`
    pub fn in_flight(&self, view: View) -> Option<RequestId> {
        match view {
            View::Auth => self.auth.in_flight,
            View::Home => self.home.in_flight,
            View::Sms => self.sms.in_flight,
            View::Qr => self.qr.in_flight,
            View::Profile => self.profile.in_flight,
            View::History => None,
        }
    }

    /// Whether the active view shows a loading indicator
    pub fn is_loading(&self) -> bool {
        self.in_flight(self.view).is_some() || (self.view == View::History && self.history.loading)
    }

    /// Whether an alert or confirmation dialog is capturing input
    pub fn has_overlay(&self) -> bool {
        self.alert.is_some() || self.confirm.is_some()
    }

    /// Result modal of the active view, if one is open
    pub fn result_modal_mut(&mut self) -> Option<&mut ResultModal> {
        match self.view {
            View::Home => self.home.result.as_mut(),
            View::Qr => self.qr.result.as_mut(),
            _ => None,
        }
    }

    pub fn result_modal(&self) -> Option<&ResultModal> {
        match self.view {
            View::Home => self.home.result.as_ref(),
            View::Qr => self.qr.result.as_ref(),
            _ => None,
        }
    }

    /// Drop everything `view` held, as if it was unmounted
    pub fn reset_view(&mut self, view: View) {
        match view {
            View::Auth => self.auth = AuthState::default(),
            View::Home => self.home = HomeState::default(),
            View::Sms => self.sms = SmsState::default(),
            View::Qr => self.qr = QrState::default(),
            View::History => self.history = HistoryState::default(),
            View::Profile => self.profile = ProfileState::default(),
        }
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_core::Verdict;

    fn entry(id: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            url: format!("https://{id}.example"),
            result: Verdict::Safe,
            confidence: None,
            date: String::new(),
        }
    }

    #[test]
    fn test_request_ids_increase() {
        let mut state = AppState::new();
        let a = state.next_request_id();
        let b = state.next_request_id();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn test_reset_view_clears_in_flight_and_input() {
        let mut state = AppState::new();
        state.home.url.set("example.com");
        state.home.in_flight = Some(RequestId(3));
        state.reset_view(View::Home);
        assert!(state.home.url.is_empty());
        assert!(state.home.in_flight.is_none());
    }

    #[test]
    fn test_history_selection_bounds() {
        let mut h = HistoryState {
            entries: vec![entry("1"), entry("2")],
            ..Default::default()
        };
        h.select_previous();
        assert_eq!(h.selected, 0);
        h.select_next();
        h.select_next();
        assert_eq!(h.selected, 1);
        assert_eq!(h.selected_entry().map(|e| e.id.as_str()), Some("2"));
    }

    #[test]
    fn test_profile_begin_edit_prefills() {
        let mut p = ProfileState {
            session: Some(UserSession {
                name: Some("Ada".into()),
                email: "ada@gmail.com".into(),
                photo: None,
            }),
            ..Default::default()
        };
        p.begin_edit();
        assert!(p.editing);
        assert_eq!(p.name.value(), "Ada");
        assert!(p.photo.is_empty());
    }

    #[test]
    fn test_banner_expiry() {
        let b = Banner::new("t", "b");
        assert!(!b.is_expired(Instant::now()));
        assert!(b.is_expired(Instant::now() + BANNER_TTL));
    }
}
