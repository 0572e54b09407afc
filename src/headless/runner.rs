//! Headless command runner - one operation, no TUI
//!
//! Each subcommand goes through the same workflows the TUI actions use, so
//! a scan from the command line validates, records and presents exactly as
//! a scan from the Home view does.

use std::io::Write;

use phishguard_app::workflow::{self, blocking, RecordAs};
use phishguard_app::Stores;
use phishguard_client::Backend;
use phishguard_core::prelude::*;
use phishguard_core::{extract_url, looks_like_web_url, present, AuthMode, HistoryStats, ScanSource};

use super::{CliEvent, Output};
use crate::cli::{Command, Credentials};

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Completed; any scanned URL is safe
    Clean,
    /// A scanned URL got a non-safe verdict
    ThreatFound,
    /// The command failed; an error event was written
    Failed,
}

impl CommandStatus {
    pub fn exit_code(self) -> i32 {
        match self {
            CommandStatus::Clean => 0,
            CommandStatus::Failed => 1,
            CommandStatus::ThreatFound => 2,
        }
    }
}

/// Run `command` and write its events to `out`.
///
/// Operation failures are reported as an error event and
/// [`CommandStatus::Failed`]; only a failure to write output is an `Err`.
pub async fn run_command<B: Backend, W: Write>(
    command: Command,
    backend: &B,
    stores: &Stores,
    out: &mut Output<W>,
) -> Result<CommandStatus> {
    debug!("Running {} command", command_name(&command));

    let result = match command {
        Command::Scan { url } => scan_url(backend, stores, out, &url).await,
        Command::Sms { text } => scan_sms(backend, stores, out, &text).await,
        Command::Qr { image } => scan_qr(backend, stores, out, image).await,
        Command::History { clear: true } => clear_history(stores, out).await,
        Command::History { clear: false } => list_history(stores, out).await,
        Command::Login(credentials) => {
            authenticate(backend, stores, out, AuthMode::Login, credentials).await
        }
        Command::Register(credentials) => {
            authenticate(backend, stores, out, AuthMode::Register, credentials).await
        }
        Command::Logout => logout(stores, out).await,
        Command::Whoami => whoami(stores, out).await,
    };

    match result {
        Ok(status) => Ok(status),
        Err(e) => {
            warn!("Command failed: {}", e);
            out.emit(&CliEvent::error(&e))?;
            Ok(CommandStatus::Failed)
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Scan { .. } => "scan",
        Command::Sms { .. } => "sms",
        Command::Qr { .. } => "qr",
        Command::History { .. } => "history",
        Command::Login(_) => "login",
        Command::Register(_) => "register",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
    }
}

// ─────────────────────────────────────────────────────────────────
// Scans
// ─────────────────────────────────────────────────────────────────

async fn scan_url<B: Backend, W: Write>(
    backend: &B,
    stores: &Stores,
    out: &mut Output<W>,
    url: &str,
) -> Result<CommandStatus> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::validation(
            "Empty URL",
            "Please enter a website address first.",
        ));
    }
    scan(backend, stores, out, url, ScanSource::Url, RecordAs::Echo).await
}

async fn scan_sms<B: Backend, W: Write>(
    backend: &B,
    stores: &Stores,
    out: &mut Output<W>,
    text: &str,
) -> Result<CommandStatus> {
    if text.trim().is_empty() {
        return Err(Error::validation("Empty", "Please paste an SMS message first."));
    }
    let url = extract_url(text).ok_or_else(|| {
        Error::validation(
            "No Link Found",
            "This message doesn't contain a recognizable link.",
        )
    })?;
    scan(backend, stores, out, &url, ScanSource::Sms, RecordAs::Echo).await
}

async fn scan_qr<B: Backend, W: Write>(
    backend: &B,
    stores: &Stores,
    out: &mut Output<W>,
    image: std::path::PathBuf,
) -> Result<CommandStatus> {
    let payload = workflow::decode_qr(image).await?;
    if !looks_like_web_url(&payload) {
        return Err(Error::validation(
            "Not a Website",
            format!("The scanned code is not a website URL: {}", payload),
        ));
    }
    scan(backend, stores, out, &payload, ScanSource::Qr, RecordAs::Submitted).await
}

async fn scan<B: Backend, W: Write>(
    backend: &B,
    stores: &Stores,
    out: &mut Output<W>,
    url: &str,
    source: ScanSource,
    record: RecordAs,
) -> Result<CommandStatus> {
    let report =
        workflow::scan_and_record(backend, &stores.history, url, Some(record), None).await?;

    let (shown_url, recorded) = match &report.recorded {
        Some(Ok(entry)) => (entry.url.clone(), true),
        _ if record == RecordAs::Echo && !report.outcome.url.is_empty() => {
            (report.outcome.url.clone(), false)
        }
        _ => (url.to_string(), false),
    };

    let presentation = present(&report.outcome.result, source);
    out.emit(&CliEvent::scan_result(
        &report.outcome,
        &shown_url,
        &presentation,
        recorded,
    ))?;

    Ok(if presentation.is_safe() {
        CommandStatus::Clean
    } else {
        CommandStatus::ThreatFound
    })
}

// ─────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────

async fn list_history<W: Write>(stores: &Stores, out: &mut Output<W>) -> Result<CommandStatus> {
    let history = stores.history.clone();
    let entries = blocking(move || history.load()).await?;

    for entry in &entries {
        out.emit(&CliEvent::history_entry(entry))?;
    }
    out.emit(&CliEvent::history_summary(HistoryStats::from_entries(
        &entries,
    )))?;
    Ok(CommandStatus::Clean)
}

async fn clear_history<W: Write>(stores: &Stores, out: &mut Output<W>) -> Result<CommandStatus> {
    let history = stores.history.clone();
    blocking(move || history.clear()).await?;
    out.emit(&CliEvent::history_cleared())?;
    Ok(CommandStatus::Clean)
}

// ─────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────

async fn authenticate<B: Backend, W: Write>(
    backend: &B,
    stores: &Stores,
    out: &mut Output<W>,
    mode: AuthMode,
    credentials: Credentials,
) -> Result<CommandStatus> {
    let success = workflow::authenticate_and_store(
        backend,
        &stores.session,
        mode,
        credentials.email.trim(),
        &credentials.password,
    )
    .await?;
    out.emit(&CliEvent::signed_in(&success.user, &success.message))?;
    Ok(CommandStatus::Clean)
}

async fn logout<W: Write>(stores: &Stores, out: &mut Output<W>) -> Result<CommandStatus> {
    let sessions = stores.session.clone();
    blocking(move || sessions.remove()).await?;
    info!("Session removed");
    out.emit(&CliEvent::signed_out())?;
    Ok(CommandStatus::Clean)
}

async fn whoami<W: Write>(stores: &Stores, out: &mut Output<W>) -> Result<CommandStatus> {
    let sessions = stores.session.clone();
    let session = blocking(move || Ok(sessions.load())).await?;
    match session {
        Some(user) => out.emit(&CliEvent::session(&user))?,
        None => out.emit(&CliEvent::NoSession)?,
    }
    Ok(CommandStatus::Clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_app::KvStore;
    use phishguard_client::test_utils::{render_qr, StubAuth, StubBackend, StubScan};
    use phishguard_core::{Confidence, ScanOutcome, UserSession, Verdict};
    use tempfile::TempDir;

    fn stores(dir: &TempDir) -> Stores {
        Stores::open(KvStore::new(dir.path()), 500)
    }

    async fn run(
        command: Command,
        backend: &StubBackend,
        stores: &Stores,
    ) -> (CommandStatus, Vec<serde_json::Value>) {
        let mut out = Output::new(Vec::new(), true);
        let status = run_command(command, backend, stores, &mut out)
            .await
            .expect("output write failed");
        let written = String::from_utf8(out.into_inner()).unwrap();
        let events = written
            .lines()
            .map(|line| serde_json::from_str(line).expect("invalid JSON line"))
            .collect();
        (status, events)
    }

    #[tokio::test]
    async fn test_scan_safe_url_records_and_exits_clean() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new().with_default_scan(StubScan::Verdict(
            Verdict::Safe,
            Some(Confidence::Score(0.98)),
        ));

        let (status, events) = run(
            Command::Scan {
                url: "  http://example.com ".into(),
            },
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Clean);
        assert_eq!(backend.scanned_urls(), vec!["http://example.com"]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["event"], "scan_result");
        assert_eq!(events[0]["result"], "Safe");
        assert_eq!(events[0]["confidence"], "98%");
        assert_eq!(events[0]["recorded"], true);

        let entries = stores.history.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].result, Verdict::Safe);
    }

    #[tokio::test]
    async fn test_scan_threat_exits_with_threat_status() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend =
            StubBackend::new().with_default_scan(StubScan::Verdict(Verdict::Phishing, None));

        let (status, events) = run(
            Command::Scan {
                url: "http://evil.example".into(),
            },
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::ThreatFound);
        assert_eq!(status.exit_code(), 2);
        assert_eq!(events[0]["safe"], false);
        assert!(events[0]["confidence"].is_null());
    }

    #[tokio::test]
    async fn test_empty_url_fails_without_request() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();

        let (status, events) = run(Command::Scan { url: "   ".into() }, &backend, &stores).await;

        assert_eq!(status, CommandStatus::Failed);
        assert_eq!(backend.scan_count(), 0);
        assert_eq!(events[0]["event"], "error");
        assert_eq!(events[0]["title"], "Empty URL");
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_connection_error() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new().with_default_scan(StubScan::Unreachable);

        let (status, events) = run(
            Command::Scan {
                url: "http://example.com".into(),
            },
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Failed);
        assert_eq!(events[0]["title"], "Connection Error");
        assert!(stores.history.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sms_scans_first_link() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();

        let (status, _) = run(
            Command::Sms {
                text: "Your parcel is held, pay at parcel-fee.example/pay now".into(),
            },
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Clean);
        assert_eq!(backend.scanned_urls(), vec!["https://parcel-fee.example/pay"]);
    }

    #[tokio::test]
    async fn test_sms_without_link_is_rejected() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();

        let (status, events) = run(
            Command::Sms {
                text: "see you at noon".into(),
            },
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Failed);
        assert_eq!(events[0]["title"], "No Link Found");
        assert_eq!(backend.scan_count(), 0);
    }

    #[tokio::test]
    async fn test_qr_with_missing_image_fails() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();

        let (status, events) = run(
            Command::Qr {
                image: dir.path().join("nope.png"),
            },
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Failed);
        assert_eq!(events[0]["event"], "error");
        assert_eq!(backend.scan_count(), 0);
    }

    #[tokio::test]
    async fn test_qr_records_decoded_payload() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let image = dir.path().join("code.png");
        render_qr("https://example.com/login").save(&image).unwrap();

        let echo = ScanOutcome::new(Verdict::Safe, "https://example.com/");
        let backend = StubBackend::new().with_default_scan(StubScan::Outcome(echo));

        let (status, events) = run(Command::Qr { image }, &backend, &stores).await;

        assert_eq!(status, CommandStatus::Clean);
        assert_eq!(backend.scanned_urls(), vec!["https://example.com/login"]);
        assert_eq!(events[0]["url"], "https://example.com/login");
        assert_eq!(
            stores.history.load().unwrap()[0].url,
            "https://example.com/login"
        );
    }

    #[tokio::test]
    async fn test_qr_non_web_payload_is_not_scanned() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let image = dir.path().join("wifi.png");
        render_qr("WIFI:S:home;T:WPA;P:secret;;").save(&image).unwrap();
        let backend = StubBackend::new();

        let (status, events) = run(Command::Qr { image }, &backend, &stores).await;

        assert_eq!(status, CommandStatus::Failed);
        assert_eq!(events[0]["title"], "Not a Website");
        assert_eq!(backend.scan_count(), 0);
    }

    #[tokio::test]
    async fn test_history_lists_newest_first_then_summary() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();
        backend.push_scan(StubScan::Verdict(Verdict::Safe, None));
        backend.push_scan(StubScan::Verdict(Verdict::Phishing, None));

        for url in ["http://first.example", "http://second.example"] {
            run(Command::Scan { url: url.into() }, &backend, &stores).await;
        }
        let (status, events) = run(Command::History { clear: false }, &backend, &stores).await;

        assert_eq!(status, CommandStatus::Clean);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["url"], "http://second.example");
        assert_eq!(events[1]["url"], "http://first.example");
        assert_eq!(events[2]["event"], "history_summary");
        assert_eq!(events[2]["total"], 2);
        assert_eq!(events[2]["threats"], 1);
    }

    #[tokio::test]
    async fn test_history_clear_keeps_session() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();
        stores.session.save(&UserSession::new("me@gmail.com")).unwrap();
        run(
            Command::Scan {
                url: "http://example.com".into(),
            },
            &backend,
            &stores,
        )
        .await;

        let (_, events) = run(Command::History { clear: true }, &backend, &stores).await;

        assert_eq!(events[0]["event"], "history_cleared");
        assert!(stores.history.load().unwrap().is_empty());
        assert!(stores.session.exists());
    }

    #[tokio::test]
    async fn test_login_caches_session() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();
        backend.push_auth(StubAuth::Success {
            user: UserSession::new("me@gmail.com"),
            message: "Login successful".into(),
        });

        let (status, events) = run(
            Command::Login(Credentials {
                email: "me@gmail.com".into(),
                password: "abcdefg1!".into(),
            }),
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Clean);
        assert_eq!(events[0]["event"], "signed_in");
        assert_eq!(events[0]["message"], "Login successful");
        assert_eq!(stores.session.load().unwrap().email, "me@gmail.com");
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_locally() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();

        let (status, events) = run(
            Command::Register(Credentials {
                email: "me@gmail.com".into(),
                password: "abcdefg1".into(),
            }),
            &backend,
            &stores,
        )
        .await;

        assert_eq!(status, CommandStatus::Failed);
        assert_eq!(events[0]["title"], "Weak Password");
        assert!(backend.auth_calls().is_empty());
        assert!(!stores.session.exists());
    }

    #[tokio::test]
    async fn test_logout_then_whoami() {
        let dir = TempDir::new().unwrap();
        let stores = stores(&dir);
        let backend = StubBackend::new();
        stores.session.save(&UserSession::new("me@gmail.com")).unwrap();

        let (_, events) = run(Command::Whoami, &backend, &stores).await;
        assert_eq!(events[0]["event"], "session");
        assert_eq!(events[0]["email"], "me@gmail.com");

        let (_, events) = run(Command::Logout, &backend, &stores).await;
        assert_eq!(events[0]["event"], "signed_out");

        let (_, events) = run(Command::Whoami, &backend, &stores).await;
        assert_eq!(events[0]["event"], "no_session");
    }
}
