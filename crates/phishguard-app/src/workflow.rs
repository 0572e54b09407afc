//! End-to-end operations shared by the TUI actions and the command line
//!
//! Each function performs one user-visible operation: talk to the backend,
//! then persist what the operation produces. Store access runs on the
//! blocking pool since it takes file locks.

use std::path::{Path, PathBuf};

use chrono::Local;
use phishguard_client::{decode_image_file, AccountService, AuthSuccess, Classifier};
use phishguard_core::prelude::*;
use phishguard_core::{
    extract_url, validate_credentials, AuthMode, HistoryEntry, HistoryStats, ScanOutcome,
    UserSession,
};

use tokio::sync::watch;

use crate::store::{HistoryRecorder, SessionStore, Stores};

/// Which URL a history entry logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAs {
    /// The URL echoed back by the server (typed and SMS scans)
    Echo,
    /// The URL that was submitted (QR payloads)
    Submitted,
}

/// Result of [`scan_and_record`]
#[derive(Debug)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// `None` when no history write was requested
    pub recorded: Option<Result<HistoryEntry>>,
}

/// Run a store operation on the blocking pool
pub async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) if e.is_cancelled() => Err(Error::Cancelled),
        Err(e) => Err(Error::store("task", e.to_string())),
    }
}

/// Classify `url` and, when `record` is set, prepend the verdict to history.
///
/// A failed history write does not fail the scan: the verdict is still
/// returned and the write error is reported in [`ScanReport::recorded`].
/// Once `shutdown` reads `true` the write is skipped and reported as
/// [`Error::Cancelled`].
pub async fn scan_and_record<C: Classifier>(
    classifier: &C,
    history: &HistoryRecorder,
    url: &str,
    record: Option<RecordAs>,
    shutdown: Option<watch::Receiver<bool>>,
) -> Result<ScanReport> {
    let outcome = classifier.classify(url).await?;

    let recorded = match record {
        Some(record) => {
            let logged = match record {
                RecordAs::Echo if !outcome.url.is_empty() => outcome.url.clone(),
                _ => url.to_string(),
            };
            let history = history.clone();
            let snapshot = outcome.clone();
            let result = blocking(move || {
                if shutdown.as_ref().is_some_and(|rx| *rx.borrow()) {
                    return Err(Error::Cancelled);
                }
                history.record(&snapshot, &logged, Local::now())
            })
            .await;
            Some(match result {
                Err(Error::Cancelled) => {
                    debug!("Scan of {} cancelled before it was recorded", url);
                    Err(Error::Cancelled)
                }
                other => other.with_context(|| {
                    format!("Scan of {} succeeded but history was not updated", url)
                }),
            })
        }
        None => None,
    };

    Ok(ScanReport { outcome, recorded })
}

/// Validate, call the login or register endpoint, then cache the session.
pub async fn authenticate_and_store<A: AccountService>(
    accounts: &A,
    sessions: &SessionStore,
    mode: AuthMode,
    email: &str,
    password: &str,
) -> Result<AuthSuccess> {
    validate_credentials(email, password, mode)?;

    let success = accounts.authenticate(mode, email, password).await?;

    let sessions = sessions.clone();
    let user = success.user.clone();
    blocking(move || sessions.save(&user))
        .await
        .context("Failed to cache session")?;

    info!("{} succeeded for {}", mode.label(), success.user.email);
    Ok(success)
}

/// Push a name and photo change, then overwrite the cached session.
///
/// An empty `photo` keeps the current one. A photo that is neither a URL
/// nor an existing file is rejected before any request.
pub async fn update_profile_and_store<A: AccountService>(
    accounts: &A,
    sessions: &SessionStore,
    session: &UserSession,
    name: &str,
    photo: &str,
) -> Result<UserSession> {
    if session.email.trim().is_empty() {
        return Err(Error::validation(
            "Error",
            "User email is missing. Please Log Out and Log In again.",
        ));
    }

    let photo = photo.trim();
    if !photo.is_empty() && !photo.starts_with("http") && !Path::new(photo).exists() {
        return Err(Error::capability(
            "Photo",
            format!("No image found at {}", photo),
        ));
    }

    let sent_photo = if photo.is_empty() {
        session.avatar().to_string()
    } else {
        photo.to_string()
    };
    accounts
        .update_profile(&session.email, name, &sent_photo)
        .await?;

    let updated = UserSession {
        name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
        email: session.email.clone(),
        photo: if photo.is_empty() {
            session.photo.clone()
        } else {
            Some(photo.to_string())
        },
    };

    let sessions = sessions.clone();
    let to_save = updated.clone();
    blocking(move || sessions.save(&to_save))
        .await
        .context("Failed to cache updated profile")?;
    Ok(updated)
}

/// Decode the QR code in the image at `path`
pub async fn decode_qr(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    blocking(move || decode_image_file(&path)).await
}

/// Session and history counts for the profile view
pub async fn load_profile(stores: &Stores) -> (Option<UserSession>, Result<HistoryStats>) {
    let stores = stores.clone();
    let loaded = tokio::task::spawn_blocking(move || {
        (stores.session.load(), stores.history.stats())
    })
    .await;

    match loaded {
        Ok(pair) => pair,
        Err(e) => (None, Err(Error::store("profile", e.to_string()))),
    }
}

/// URL to auto-scan from clipboard text, unless it is the one scanned last
pub fn auto_scan_candidate(text: &str, last: Option<&str>) -> Option<String> {
    let url = extract_url(text)?;
    if last == Some(url.as_str()) {
        trace!("Clipboard link {} already scanned", url);
        return None;
    }
    Some(url)
}
