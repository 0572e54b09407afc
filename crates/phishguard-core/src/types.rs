//! Core domain types for PhishGuard

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Avatar shown when a session carries no photo
pub const DEFAULT_AVATAR_URL: &str = "https://cdn-icons-png.flaticon.com/512/3135/3135715.png";

/// Display name used when a session carries no name
pub const DEFAULT_DISPLAY_NAME: &str = "PhishGuard User";

/// Format used for the human-readable `date` field of history entries
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─────────────────────────────────────────────────────────────────────────────
// Verdict
// ─────────────────────────────────────────────────────────────────────────────

/// Classification result returned by the remote service for a scanned URL.
///
/// The set is open: the server may return labels we do not know about, which
/// are kept verbatim in [`Verdict::Other`]. Serialized as the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Safe,
    Suspicious,
    Phishing,
    Unknown,
    Other(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::Suspicious => "Suspicious",
            Verdict::Phishing => "Phishing",
            Verdict::Unknown => "Unknown",
            Verdict::Other(s) => s.as_str(),
        }
    }

    /// Only an exact `Safe` is safe; every other verdict gets the danger treatment.
    pub fn is_safe(&self) -> bool {
        matches!(self, Verdict::Safe)
    }

    /// Verdicts that warrant a background notification when auto-scanning.
    pub fn is_threat(&self) -> bool {
        matches!(self, Verdict::Phishing | Verdict::Suspicious)
    }
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Safe" => Verdict::Safe,
            "Suspicious" => Verdict::Suspicious,
            "Phishing" => Verdict::Phishing,
            "Unknown" => Verdict::Unknown,
            _ => Verdict::Other(s),
        }
    }
}

impl From<&str> for Verdict {
    fn from(s: &str) -> Self {
        Verdict::from(s.to_string())
    }
}

impl From<Verdict> for String {
    fn from(v: Verdict) -> Self {
        match v {
            Verdict::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Confidence
// ─────────────────────────────────────────────────────────────────────────────

/// Confidence attached to a verdict: a numeric score or a label such as "High".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Score(f64),
    Label(String),
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Score(v) if (0.0..=1.0).contains(v) => write!(f, "{:.0}%", v * 100.0),
            Confidence::Score(v) => write!(f, "{}", v),
            Confidence::Label(s) => f.write_str(s),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scan Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Successful response of the scan endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub result: Verdict,

    /// URL as echoed back by the server
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    /// Reasons given by the classifier; a bare string is accepted as one reason
    #[serde(
        default,
        deserialize_with = "deserialize_explanation",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub explanation: Vec<String>,
}

impl ScanOutcome {
    pub fn new(result: Verdict, url: impl Into<String>) -> Self {
        Self {
            result,
            url: url.into(),
            confidence: None,
            explanation: Vec::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_explanation(mut self, lines: Vec<String>) -> Self {
        self.explanation = lines;
        self
    }
}

fn deserialize_explanation<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
        Nothing,
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::Many(v)) => v,
        Some(OneOrMany::One(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// One persisted record of a past scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in Unix milliseconds, as a decimal string
    pub id: String,
    pub url: String,
    pub result: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    /// Human-readable local timestamp
    pub date: String,
}

impl HistoryEntry {
    /// Build an entry for a scan that completed at `at`.
    ///
    /// `url` is the URL to record; callers pass the server echo for typed and
    /// SMS scans and the decoded payload for QR scans.
    pub fn from_outcome(outcome: &ScanOutcome, url: impl Into<String>, at: DateTime<Local>) -> Self {
        Self {
            id: at.timestamp_millis().to_string(),
            url: url.into(),
            result: outcome.result.clone(),
            confidence: outcome.confidence.clone(),
            date: at.format(HISTORY_DATE_FORMAT).to_string(),
        }
    }

    /// Numeric id, if the id is the usual millisecond timestamp
    pub fn id_millis(&self) -> Option<i64> {
        self.id.parse().ok()
    }
}

/// Aggregate counts shown on the profile view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    pub threats: usize,
}

impl HistoryStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        Self {
            total: entries.len(),
            threats: entries.iter().filter(|e| !e.result.is_safe()).count(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Locally cached proof of a prior successful login.
///
/// Unknown server fields (`_id`, `joined_at`, `password`, ...) are dropped on
/// deserialization and therefore never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl UserSession {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            photo: None,
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => n,
            _ => DEFAULT_DISPLAY_NAME,
        }
    }

    pub fn avatar(&self) -> &str {
        match self.photo.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => DEFAULT_AVATAR_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_verdict_known_values() {
        assert_eq!(Verdict::from("Safe"), Verdict::Safe);
        assert_eq!(Verdict::from("Phishing"), Verdict::Phishing);
        assert_eq!(Verdict::from("Suspicious"), Verdict::Suspicious);
    }

    #[test]
    fn test_verdict_preserves_unknown_labels() {
        let v = Verdict::from("Malware");
        assert_eq!(v, Verdict::Other("Malware".into()));
        assert_eq!(v.to_string(), "Malware");
        assert!(!v.is_safe());
        assert!(!v.is_threat());
    }

    #[test]
    fn test_verdict_serializes_as_plain_string() {
        let json = serde_json::to_string(&Verdict::Phishing).unwrap();
        assert_eq!(json, "\"Phishing\"");
        let back: Verdict = serde_json::from_str("\"Safe\"").unwrap();
        assert!(back.is_safe());
    }

    #[test]
    fn test_verdict_is_case_sensitive() {
        // The server contract is "Safe"; anything else is treated as dangerous
        assert!(!Verdict::from("safe").is_safe());
    }

    #[test]
    fn test_confidence_accepts_number_or_label() {
        let n: Confidence = serde_json::from_str("0.98").unwrap();
        assert_eq!(n, Confidence::Score(0.98));
        assert_eq!(n.to_string(), "98%");

        let l: Confidence = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(l.to_string(), "High");
    }

    #[test]
    fn test_scan_outcome_explanation_forms() {
        let list: ScanOutcome = serde_json::from_str(
            r#"{"result":"Phishing","url":"https://x.io","confidence":"High","explanation":["a","b"]}"#,
        )
        .unwrap();
        assert_eq!(list.explanation, vec!["a", "b"]);

        let single: ScanOutcome =
            serde_json::from_str(r#"{"result":"Safe","url":"https://x.io","explanation":"ok"}"#)
                .unwrap();
        assert_eq!(single.explanation, vec!["ok"]);

        let absent: ScanOutcome =
            serde_json::from_str(r#"{"result":"Safe","url":"https://x.io"}"#).unwrap();
        assert!(absent.explanation.is_empty());
        assert!(absent.confidence.is_none());

        let null: ScanOutcome =
            serde_json::from_str(r#"{"result":"Safe","url":"https://x.io","explanation":null}"#)
                .unwrap();
        assert!(null.explanation.is_empty());
    }

    #[test]
    fn test_history_entry_from_outcome() {
        let at = Local.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let outcome = ScanOutcome::new(Verdict::Safe, "http://example.com")
            .with_confidence(Confidence::Score(0.98));

        let entry = HistoryEntry::from_outcome(&outcome, outcome.url.clone(), at);

        assert_eq!(entry.id, at.timestamp_millis().to_string());
        assert_eq!(entry.id_millis(), Some(at.timestamp_millis()));
        assert_eq!(entry.url, "http://example.com");
        assert_eq!(entry.result, Verdict::Safe);
        assert_eq!(entry.date, "2026-03-14 09:26:53");
    }

    #[test]
    fn test_history_entry_omits_missing_confidence() {
        let at = Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let outcome = ScanOutcome::new(Verdict::Phishing, "https://evil.test");
        let entry = HistoryEntry::from_outcome(&outcome, "https://evil.test", at);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("confidence"));
    }

    #[test]
    fn test_history_stats_counts_non_safe_as_threats() {
        let at = Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mk = |v: &str| {
            HistoryEntry::from_outcome(&ScanOutcome::new(Verdict::from(v), "u"), "u", at)
        };
        let entries = vec![mk("Safe"), mk("Phishing"), mk("Suspicious"), mk("Safe")];
        let stats = HistoryStats::from_entries(&entries);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.threats, 2);
    }

    #[test]
    fn test_session_ignores_server_only_fields() {
        let json = r#"{
            "_id": "65f0c0ffee",
            "email": "user@gmail.com",
            "password": "hunter2!",
            "name": "User",
            "joined_at": "Mon, 01 Jan 2024 00:00:00 GMT"
        }"#;
        let session: UserSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.email, "user@gmail.com");
        assert_eq!(session.name.as_deref(), Some("User"));

        let out = serde_json::to_string(&session).unwrap();
        assert!(!out.contains("password"));
        assert!(!out.contains("_id"));
    }

    #[test]
    fn test_session_display_defaults() {
        let session = UserSession::new("user@gmail.com");
        assert_eq!(session.display_name(), DEFAULT_DISPLAY_NAME);
        assert_eq!(session.avatar(), DEFAULT_AVATAR_URL);

        let named = UserSession {
            name: Some("Ada".into()),
            ..session
        };
        assert_eq!(named.display_name(), "Ada");
    }
}
