//! # phishguard-core - Core Domain Types
//!
//! Foundation crate for PhishGuard. Provides domain types, error handling,
//! logging setup, URL extraction, credential validation, and verdict
//! presentation.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Verdict`] - Classifier result (Safe, Suspicious, Phishing, Unknown, or server-defined)
//! - [`Confidence`] - Numeric score or label attached to a verdict
//! - [`ScanOutcome`] - Successful scan response
//! - [`HistoryEntry`], [`HistoryStats`] - Persisted scan log and its counts
//! - [`UserSession`] - Cached login
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum grouped by the layer that failed
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### URL Extraction (`extract`)
//! - [`extract_url()`] - First URL-like substring, scheme-normalized
//! - [`extract_all()`] - Every URL-like substring
//!
//! ### Validation (`validate`)
//! - [`validate_credentials()`] - Auth form checks (non-empty, Gmail, strong password)
//!
//! ### Presentation (`presenter`)
//! - [`present()`] - Verdict → title, tone, icon, haptic pattern
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use phishguard_core::prelude::*;
//! ```

pub mod error;
pub mod extract;
pub mod logging;
pub mod presenter;
pub mod types;
pub mod validate;

/// Prelude for common imports used throughout all PhishGuard crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use extract::{extract_all, extract_url, looks_like_web_url};
pub use presenter::{
    present, sms_alert_body, threat_notification, HapticPattern, Presentation, PresentationIcon,
    ScanSource, Tone, DANGER_TITLE, SAFE_TITLE,
};
pub use types::{
    Confidence, HistoryEntry, HistoryStats, ScanOutcome, UserSession, Verdict, DEFAULT_AVATAR_URL,
    DEFAULT_DISPLAY_NAME, HISTORY_DATE_FORMAT,
};
pub use validate::{
    is_strong_password, is_valid_gmail, validate_credentials, AuthMode, MIN_PASSWORD_LEN,
};
