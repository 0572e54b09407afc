//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Input Validation Errors (caught before any network call)
    // ─────────────────────────────────────────────────────────────
    #[error("{title}: {message}")]
    Validation { title: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Remote Service Errors
    // ─────────────────────────────────────────────────────────────
    /// The service answered but reported a failure (`error` field or non-2xx)
    #[error("Server error: {message}")]
    Server {
        status: Option<u16>,
        message: String,
    },

    /// Transport-level failure: DNS, refused connection, TLS, broken body
    #[error("Cannot connect to server: {message}")]
    Connection { message: String },

    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Request was cancelled")]
    Cancelled,

    // ─────────────────────────────────────────────────────────────
    // Device Capability Errors
    // ─────────────────────────────────────────────────────────────
    /// Capability missing or access denied (clipboard tool, notifier, image file)
    #[error("{capability} unavailable: {reason}")]
    Capability { capability: String, reason: String },

    #[error("QR decode failed: {message}")]
    QrDecode { message: String },

    // ─────────────────────────────────────────────────────────────
    // Persistence Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Store error for key '{key}': {message}")]
    Store { key: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn capability(capability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Capability {
            capability: capability.into(),
            reason: reason.into(),
        }
    }

    pub fn qr_decode(message: impl Into<String>) -> Self {
        Self::QrDecode {
            message: message.into(),
        }
    }

    pub fn store(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the failure happened at the transport level (no verdict, no server message)
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connection { .. } | Error::Timeout { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
