//! Credential validation performed before any auth request is sent

use crate::error::{Error, Result};

/// Characters that satisfy the "special character" rule for new passwords
pub const PASSWORD_SPECIALS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Minimum password length for registration
pub const MIN_PASSWORD_LEN: usize = 8;

const GMAIL_SUFFIX: &str = "@gmail.com";

/// Whether the auth form logs into an existing account or creates one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    /// Endpoint path for this mode
    pub fn endpoint(self) -> &'static str {
        match self {
            AuthMode::Login => "/login",
            AuthMode::Register => "/register",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Register => "Sign Up",
        }
    }
}

/// Whole-string, case-insensitive `@gmail.com` suffix check.
pub fn is_valid_gmail(email: &str) -> bool {
    email.to_lowercase().ends_with(GMAIL_SUFFIX)
}

/// At least [`MIN_PASSWORD_LEN`] characters with a digit and one of [`PASSWORD_SPECIALS`].
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(&c))
}

/// Validate the auth form in order: empty fields, email domain, then
/// (registration only) password strength.
pub fn validate_credentials(email: &str, password: &str, mode: AuthMode) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::validation("Error", "Please fill in all fields"));
    }

    if !is_valid_gmail(email) {
        return Err(Error::validation(
            "Invalid Email",
            "Only @gmail.com addresses are accepted.",
        ));
    }

    if mode == AuthMode::Register && !is_strong_password(password) {
        return Err(Error::validation(
            "Weak Password",
            "Password must be at least 8 characters long and include:\n\
             - At least 1 number\n\
             - At least 1 special character (!@#$)",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_of(err: Error) -> String {
        match err {
            Error::Validation { title, .. } => title,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_gmail_accepts_exact_suffix() {
        assert!(is_valid_gmail("user@gmail.com"));
        assert!(is_valid_gmail("User@GMAIL.com"));
    }

    #[test]
    fn test_gmail_rejects_lookalikes() {
        assert!(!is_valid_gmail("user@yahoo.com"));
        assert!(!is_valid_gmail("user@GMAIL.COM.evil.com"));
        assert!(!is_valid_gmail("notgmail.com@attacker.com"));
        assert!(!is_valid_gmail("user@gmail.co"));
    }

    #[test]
    fn test_password_strength() {
        assert!(!is_strong_password("abcdefg"));
        assert!(!is_strong_password("abcdefg1"));
        assert!(!is_strong_password("abcdefg!"));
        assert!(!is_strong_password("ab1!"));
        assert!(is_strong_password("abcdefg1!"));
    }

    #[test]
    fn test_empty_fields_checked_first() {
        let err = validate_credentials("", "", AuthMode::Register).unwrap_err();
        assert_eq!(err.to_string(), "Error: Please fill in all fields");

        // Empty password wins over an invalid email
        let err = validate_credentials("user@yahoo.com", "", AuthMode::Login).unwrap_err();
        assert_eq!(title_of(err), "Error");
    }

    #[test]
    fn test_invalid_email_rejected_for_both_modes() {
        for mode in [AuthMode::Login, AuthMode::Register] {
            let err = validate_credentials("user@yahoo.com", "abcdefg1!", mode).unwrap_err();
            assert_eq!(title_of(err), "Invalid Email");
        }
    }

    #[test]
    fn test_weak_password_only_blocks_registration() {
        assert!(validate_credentials("user@gmail.com", "abc", AuthMode::Login).is_ok());

        let err = validate_credentials("user@gmail.com", "abcdefg1", AuthMode::Register).unwrap_err();
        assert_eq!(title_of(err), "Weak Password");

        assert!(validate_credentials("user@gmail.com", "abcdefg1!", AuthMode::Register).is_ok());
    }

    #[test]
    fn test_auth_mode_toggle_and_endpoint() {
        assert_eq!(AuthMode::default(), AuthMode::Login);
        assert_eq!(AuthMode::Login.toggle(), AuthMode::Register);
        assert_eq!(AuthMode::Register.endpoint(), "/register");
    }
}
