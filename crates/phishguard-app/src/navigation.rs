//! View selection as a pure reducer
//!
//! There is exactly one active view. `Auth` gates everything else: while it
//! is showing, only a successful login leaves it. Opening `Auth` from any
//! other view is a logout.

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Auth,
    Home,
    Sms,
    Qr,
    History,
    Profile,
}

impl View {
    /// Views reachable from the navigation bar, in display order
    pub const TABS: [View; 5] = [View::Home, View::Sms, View::Qr, View::History, View::Profile];

    pub fn title(self) -> &'static str {
        match self {
            View::Auth => "Sign In",
            View::Home => "Home",
            View::Sms => "SMS Guard",
            View::Qr => "QR Scanner",
            View::History => "Scan History",
            View::Profile => "Profile",
        }
    }

    /// Tab for the F-key / digit shortcut `n` (1-based)
    pub fn from_shortcut(n: u8) -> Option<View> {
        View::TABS.get(usize::from(n).checked_sub(1)?).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Initial view once the session store has been checked
    Startup { has_session: bool },
    /// Open a view; `Auth` means log out
    Open(View),
    /// Leave the current view for Home
    Back,
    /// Login or registration completed
    LoginSucceeded,
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub view: View,
    /// The cached session must be removed (history is kept)
    pub logout: bool,
}

impl Transition {
    fn to(view: View) -> Self {
        Self {
            view,
            logout: false,
        }
    }
}

/// Compute the next view. Pure: side effects are described by the result.
pub fn navigate(current: View, action: NavAction) -> Transition {
    match action {
        NavAction::Startup { has_session: true } => Transition::to(View::Home),
        NavAction::Startup { has_session: false } => Transition::to(View::Auth),

        NavAction::LoginSucceeded => Transition::to(View::Home),

        NavAction::Open(View::Auth) => Transition {
            view: View::Auth,
            logout: current != View::Auth,
        },

        // Without a session nothing but login leaves Auth
        _ if current == View::Auth => Transition::to(View::Auth),

        NavAction::Open(view) => Transition::to(view),
        NavAction::Back => Transition::to(View::Home),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup() {
        assert_eq!(
            navigate(View::Auth, NavAction::Startup { has_session: true }).view,
            View::Home
        );
        assert_eq!(
            navigate(View::Auth, NavAction::Startup { has_session: false }).view,
            View::Auth
        );
    }

    #[test]
    fn test_open_auth_is_logout_from_every_view() {
        for from in View::TABS {
            let t = navigate(from, NavAction::Open(View::Auth));
            assert_eq!(t.view, View::Auth);
            assert!(t.logout, "opening Auth from {from:?} must log out");
        }
    }

    #[test]
    fn test_auth_gate() {
        for to in View::TABS {
            assert_eq!(navigate(View::Auth, NavAction::Open(to)).view, View::Auth);
        }
        assert_eq!(navigate(View::Auth, NavAction::Back).view, View::Auth);
        assert!(!navigate(View::Auth, NavAction::Open(View::Auth)).logout);
    }

    #[test]
    fn test_login_goes_home() {
        let t = navigate(View::Auth, NavAction::LoginSucceeded);
        assert_eq!(t, Transition::to(View::Home));
    }

    #[test]
    fn test_open_between_tabs() {
        for from in View::TABS {
            for to in View::TABS {
                let t = navigate(from, NavAction::Open(to));
                assert_eq!(t.view, to);
                assert!(!t.logout);
            }
        }
    }

    #[test]
    fn test_back_returns_home() {
        assert_eq!(navigate(View::History, NavAction::Back).view, View::Home);
        assert_eq!(navigate(View::Home, NavAction::Back).view, View::Home);
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(View::from_shortcut(1), Some(View::Home));
        assert_eq!(View::from_shortcut(5), Some(View::Profile));
        assert_eq!(View::from_shortcut(0), None);
        assert_eq!(View::from_shortcut(6), None);
    }
}
