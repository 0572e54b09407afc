//! Request and response bodies exchanged with the PhishGuard API
//!
//! All endpoints take and return JSON. Responses are parsed leniently: the
//! server adds fields over time and we only read the ones listed here.

use phishguard_core::prelude::*;
use phishguard_core::{ScanOutcome, UserSession};
use serde::{Deserialize, Serialize};

pub const SCAN_PATH: &str = "/scan";
pub const UPDATE_PROFILE_PATH: &str = "/update-profile";

/// Fallback message when an auth failure carries no `error` field
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub photo: &'a str,
}

/// Body of `/login` and `/register` responses, success or failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<UserSession>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Successful login or registration
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSuccess {
    pub user: UserSession,
    pub message: String,
}

/// Interpret a `/scan` response body.
///
/// A body carrying an `error` field is a server failure regardless of the
/// HTTP status; otherwise a 2xx body must decode as a [`ScanOutcome`].
pub fn parse_scan_response(status: u16, body: &str) -> Result<ScanOutcome> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        Error::server(
            Some(status),
            format!("Invalid response from server (HTTP {status}): {e}"),
        )
    })?;

    if let Some(message) = error_field(&value) {
        return Err(Error::server(Some(status), message));
    }

    if !(200..300).contains(&status) {
        return Err(Error::server(
            Some(status),
            format!("Server returned HTTP {status}"),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::server(Some(status), format!("Unexpected scan response: {e}")))
}

/// Interpret a `/login` or `/register` response body.
pub fn parse_auth_response(status: u16, body: &str) -> Result<AuthSuccess> {
    let parsed: AuthResponse = serde_json::from_str(body).unwrap_or_else(|e| {
        debug!("Auth response is not JSON (HTTP {}): {}", status, e);
        AuthResponse::default()
    });

    if !(200..300).contains(&status) {
        let message = parsed
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_string());
        return Err(Error::server(Some(status), message));
    }

    match parsed.user {
        Some(user) => Ok(AuthSuccess {
            user,
            message: parsed.message.unwrap_or_default(),
        }),
        None => Err(Error::server(Some(status), AUTH_FAILED_MESSAGE)),
    }
}

fn error_field(value: &serde_json::Value) -> Option<String> {
    match value.get("error")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_core::{Confidence, Verdict};

    #[test]
    fn test_scan_success() {
        let body = r#"{"result":"Safe","url":"http://example.com","confidence":0.98}"#;
        let outcome = parse_scan_response(200, body).unwrap();
        assert_eq!(outcome.result, Verdict::Safe);
        assert_eq!(outcome.url, "http://example.com");
        assert_eq!(outcome.confidence, Some(Confidence::Score(0.98)));
    }

    #[test]
    fn test_scan_error_field_on_2xx_is_failure() {
        let err = parse_scan_response(200, r#"{"error":"Model not loaded"}"#).unwrap_err();
        match err {
            Error::Server { status, message } => {
                assert_eq!(status, Some(200));
                assert_eq!(message, "Model not loaded");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_scan_null_error_field_is_ignored() {
        let body = r#"{"result":"Phishing","url":"https://x.io","error":null}"#;
        assert!(parse_scan_response(200, body).is_ok());
    }

    #[test]
    fn test_scan_non_2xx_surfaces_error_text() {
        let err = parse_scan_response(400, r#"{"error":"No URL provided"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Server error: No URL provided");

        let err = parse_scan_response(502, r#"{}"#).unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_scan_invalid_json() {
        let err = parse_scan_response(200, "<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Server { .. }));
    }

    #[test]
    fn test_auth_success_keeps_only_session_fields() {
        let body = r#"{
            "message": "Login successful",
            "user": {"_id": "1", "email": "user@gmail.com", "password": "x", "name": "Ada"}
        }"#;
        let ok = parse_auth_response(200, body).unwrap();
        assert_eq!(ok.message, "Login successful");
        assert_eq!(ok.user.email, "user@gmail.com");
        assert_eq!(ok.user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_auth_failure_uses_server_error() {
        let err = parse_auth_response(401, r#"{"error":"Invalid credentials"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Server error: Invalid credentials");
    }

    #[test]
    fn test_auth_failure_without_error_field() {
        let err = parse_auth_response(500, "Internal Server Error").unwrap_err();
        assert_eq!(err.to_string(), "Server error: Authentication failed");
    }

    #[test]
    fn test_register_created_status_is_success() {
        let body = r#"{"message":"User registered","user":{"email":"new@gmail.com"}}"#;
        assert!(parse_auth_response(201, body).is_ok());
    }
}
