//! # phishguard-client - Backend and Device I/O
//!
//! Everything PhishGuard does outside its own process:
//!
//! - [`ApiClient`] - reqwest client for `/scan`, `/login`, `/register`, `/update-profile`
//! - [`Classifier`], [`AccountService`], [`Backend`] - service traits the app is generic over
//! - [`Clipboard`] - clipboard text via the platform clipboard tool
//! - [`Notifier`] - desktop notifications
//! - [`Haptics`] - vibration patterns as terminal bells
//! - [`qr`] - QR decoding from image files and luma frames

pub mod api;
pub mod clipboard;
pub mod haptics;
pub mod notify;
pub mod protocol;
pub mod qr;
pub mod service;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
pub use clipboard::{Clipboard, ClipboardTool};
pub use haptics::Haptics;
pub use notify::{Notifier, NotifierKind};
pub use protocol::AuthSuccess;
pub use qr::{decode_image_file, decode_luma};
pub use service::{AccountService, Backend, Classifier};
