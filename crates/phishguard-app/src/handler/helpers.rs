//! Helper functions for the handler module

use phishguard_core::Error;

use crate::confirm_dialog::AlertState;
use crate::message::{FailureKind, RequestError};

/// Alert for an input error caught before any request
pub fn validation_alert(err: &Error) -> AlertState {
    match err {
        Error::Validation { title, message } => AlertState::error(title.clone(), message.clone()),
        other => AlertState::error("Error", other.to_string()),
    }
}

/// Alert for a failed request.
///
/// Connectivity failures use the caller's wording since each view phrases
/// "backend unreachable" differently.
pub fn failure_alert(err: &RequestError, offline_title: &str, offline_body: &str) -> AlertState {
    match err.kind {
        FailureKind::Connectivity => AlertState::error(offline_title, offline_body),
        FailureKind::Server => AlertState::error("Server Error", err.message.clone()),
        FailureKind::Capability => AlertState::error("Permission Required", err.message.clone()),
        FailureKind::Storage => AlertState::error("Storage Error", err.message.clone()),
        FailureKind::Validation | FailureKind::Decode | FailureKind::Cancelled => {
            AlertState::error("Error", err.message.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_alert_keeps_title() {
        let alert = validation_alert(&Error::validation("Weak Password", "too short"));
        assert_eq!(alert.title, "Weak Password");
        assert_eq!(alert.body, "too short");
    }

    #[test]
    fn test_failure_alert_titles() {
        let offline = RequestError::new(FailureKind::Connectivity, "refused");
        let alert = failure_alert(&offline, "Connection Error", "Check your server.");
        assert_eq!(alert.title, "Connection Error");
        assert_eq!(alert.body, "Check your server.");

        let server = RequestError::new(FailureKind::Server, "Model offline");
        assert_eq!(failure_alert(&server, "x", "y").title, "Server Error");

        let denied = RequestError::new(FailureKind::Capability, "no clipboard tool");
        assert_eq!(failure_alert(&denied, "x", "y").title, "Permission Required");
    }
}
