//! Headless output - results of one-shot commands
//!
//! Subcommands report through [`CliEvent`]s. With `--json` each event is
//! written as one line of JSON (NDJSON) with an `"event"` field naming its
//! type; otherwise as plain text.
//!
//! ```json
//! {"event":"scan_result","url":"http://example.com","result":"Safe","safe":true,...}
//! {"event":"history_entry","id":"1704700001000","url":"http://example.com","result":"Safe",...}
//! {"event":"error","title":"Connection Error","message":"...","timestamp":1704700002000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use phishguard_app::RequestError;
use phishguard_core::prelude::*;
use phishguard_core::{HistoryEntry, HistoryStats, Presentation, ScanOutcome, UserSession};
use serde::Serialize;

/// Everything a command can report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CliEvent {
    /// The classifier answered
    ScanResult {
        url: String,
        result: String,
        safe: bool,
        title: String,
        description: String,
        confidence: Option<String>,
        explanation: Vec<String>,
        /// Whether the scan was added to history
        recorded: bool,
        timestamp: i64,
    },

    HistoryEntry {
        id: String,
        url: String,
        result: String,
        confidence: Option<String>,
        date: String,
    },

    /// Follows the entries of a history listing
    HistorySummary { total: usize, threats: usize },

    HistoryCleared { timestamp: i64 },

    SignedIn {
        email: String,
        name: Option<String>,
        message: String,
        timestamp: i64,
    },

    SignedOut { timestamp: i64 },

    Session {
        email: String,
        name: String,
        photo: String,
    },

    NoSession,

    Error {
        title: String,
        message: String,
        timestamp: i64,
    },
}

impl CliEvent {
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn scan_result(
        outcome: &ScanOutcome,
        url: &str,
        presentation: &Presentation,
        recorded: bool,
    ) -> Self {
        Self::ScanResult {
            url: url.to_string(),
            result: outcome.result.to_string(),
            safe: presentation.is_safe(),
            title: presentation.title.to_string(),
            description: presentation.description.to_string(),
            confidence: outcome.confidence.as_ref().map(ToString::to_string),
            explanation: outcome.explanation.clone(),
            recorded,
            timestamp: Self::now(),
        }
    }

    pub fn history_entry(entry: &HistoryEntry) -> Self {
        Self::HistoryEntry {
            id: entry.id.clone(),
            url: entry.url.clone(),
            result: entry.result.to_string(),
            confidence: entry.confidence.as_ref().map(ToString::to_string),
            date: entry.date.clone(),
        }
    }

    pub fn history_summary(stats: HistoryStats) -> Self {
        Self::HistorySummary {
            total: stats.total,
            threats: stats.threats,
        }
    }

    pub fn history_cleared() -> Self {
        Self::HistoryCleared {
            timestamp: Self::now(),
        }
    }

    pub fn signed_in(user: &UserSession, message: &str) -> Self {
        Self::SignedIn {
            email: user.email.clone(),
            name: user.name.clone(),
            message: message.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn signed_out() -> Self {
        Self::SignedOut {
            timestamp: Self::now(),
        }
    }

    pub fn session(user: &UserSession) -> Self {
        Self::Session {
            email: user.email.clone(),
            name: user.display_name().to_string(),
            photo: user.avatar().to_string(),
        }
    }

    /// Error event with the same title the TUI would show in its alert
    pub fn error(err: &Error) -> Self {
        let title = match err {
            Error::Validation { title, .. } => title.as_str(),
            Error::Server { .. } => "Server Error",
            Error::Connection { .. } | Error::Timeout { .. } => "Connection Error",
            Error::Capability { .. } => "Permission Required",
            Error::QrDecode { .. } => "No QR Code",
            Error::Store { .. } | Error::Io(_) | Error::Json(_) => "Storage Error",
            _ => "Error",
        };
        Self::Error {
            title: title.to_string(),
            message: RequestError::from(err).message,
            timestamp: Self::now(),
        }
    }

    /// Plain-text rendering, one or more lines without a trailing newline
    pub fn to_text(&self) -> String {
        match self {
            Self::ScanResult {
                url,
                result,
                title,
                description,
                confidence,
                explanation,
                recorded,
                ..
            } => {
                let mut lines = vec![
                    title.clone(),
                    description.clone(),
                    format!("  URL:        {}", url),
                    format!("  Verdict:    {}", result),
                ];
                if let Some(confidence) = confidence {
                    lines.push(format!("  Confidence: {}", confidence));
                }
                lines.extend(explanation.iter().map(|reason| format!("  • {}", reason)));
                if !recorded {
                    lines.push("  (not saved to history)".to_string());
                }
                lines.join("\n")
            }
            Self::HistoryEntry {
                url,
                result,
                confidence,
                date,
                ..
            } => match confidence {
                Some(c) => format!("{}  {:<10} {:>5}  {}", date, result, c, url),
                None => format!("{}  {:<10} {:>5}  {}", date, result, "-", url),
            },
            Self::HistorySummary { total: 0, .. } => "No scans yet".to_string(),
            Self::HistorySummary { total, threats } => {
                format!("{} scans · {} threats", total, threats)
            }
            Self::HistoryCleared { .. } => "Scan history cleared".to_string(),
            Self::SignedIn { email, message, .. } => format!("{} ({})", message, email),
            Self::SignedOut { .. } => "Logged out".to_string(),
            Self::Session { email, name, .. } => format!("{} <{}>", name, email),
            Self::NoSession => "Not logged in".to_string(),
            Self::Error { title, message, .. } => format!("{}: {}", title, message),
        }
    }
}

/// Where command events go
pub struct Output<W: Write> {
    writer: W,
    json: bool,
}

impl Output<io::Stdout> {
    pub fn stdout(json: bool) -> Self {
        Self::new(io::stdout(), json)
    }
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { writer, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Write one event and flush
    pub fn emit(&mut self, event: &CliEvent) -> Result<()> {
        if self.json {
            let line = serde_json::to_string(event)?;
            writeln!(self.writer, "{}", line)?;
        } else {
            writeln!(self.writer, "{}", event.to_text())?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishguard_core::{present, Confidence, ScanSource, Verdict};

    fn phishing_outcome() -> ScanOutcome {
        ScanOutcome::new(Verdict::Phishing, "http://evil.example")
            .with_confidence(Confidence::Score(0.91))
            .with_explanation(vec!["Lookalike domain".into()])
    }

    #[test]
    fn test_scan_result_serialization() {
        let outcome = phishing_outcome();
        let presentation = present(&outcome.result, ScanSource::Url);
        let event = CliEvent::scan_result(&outcome, &outcome.url, &presentation, true);
        let json = serde_json::to_string(&event).expect("serialization failed");

        let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

        assert_eq!(value["event"], "scan_result");
        assert_eq!(value["url"], "http://evil.example");
        assert_eq!(value["result"], "Phishing");
        assert_eq!(value["safe"], false);
        assert_eq!(value["confidence"], "91%");
        assert_eq!(value["explanation"][0], "Lookalike domain");
        assert_eq!(value["recorded"], true);
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_error_titles_follow_failure_kind() {
        let cases = [
            (Error::validation("Invalid Email", "Only Gmail"), "Invalid Email"),
            (Error::server(Some(500), "Model offline"), "Server Error"),
            (Error::connection("refused"), "Connection Error"),
            (Error::Timeout { secs: 3 }, "Connection Error"),
            (Error::capability("Photo", "missing"), "Permission Required"),
            (Error::store("scanHistory", "locked"), "Storage Error"),
        ];
        for (err, title) in cases {
            match CliEvent::error(&err) {
                CliEvent::Error { title: t, .. } => assert_eq!(t, title, "for {:?}", err),
                other => panic!("unexpected event {:?}", other),
            }
        }
    }

    #[test]
    fn test_error_message_is_user_facing() {
        let event = CliEvent::error(&Error::server(Some(400), "No URL provided"));
        assert_eq!(event.to_text(), "Server Error: No URL provided");
    }

    #[test]
    fn test_text_rendering_of_scan_result() {
        let outcome = phishing_outcome();
        let presentation = present(&outcome.result, ScanSource::Url);
        let text = CliEvent::scan_result(&outcome, &outcome.url, &presentation, false).to_text();

        assert!(text.contains("THREAT DETECTED"));
        assert!(text.contains("Verdict:    Phishing"));
        assert!(text.contains("Confidence: 91%"));
        assert!(text.contains("• Lookalike domain"));
        assert!(text.contains("not saved to history"));
    }

    #[test]
    fn test_history_summary_text() {
        let empty = CliEvent::history_summary(HistoryStats::default());
        assert_eq!(empty.to_text(), "No scans yet");

        let some = CliEvent::HistorySummary {
            total: 3,
            threats: 1,
        };
        assert_eq!(some.to_text(), "3 scans · 1 threats");
    }

    #[test]
    fn test_output_writes_ndjson_lines() {
        let mut out = Output::new(Vec::new(), true);
        out.emit(&CliEvent::signed_out()).unwrap();
        out.emit(&CliEvent::NoSession).unwrap();

        let written = String::from_utf8(out.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"event":"signed_out""#));
        assert_eq!(lines[1], r#"{"event":"no_session"}"#);
    }

    #[test]
    fn test_output_writes_text_lines() {
        let mut out = Output::new(Vec::new(), false);
        out.emit(&CliEvent::NoSession).unwrap();
        assert_eq!(String::from_utf8(out.into_inner()).unwrap(), "Not logged in\n");
    }
}
