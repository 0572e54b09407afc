//! Verdict → user-facing presentation
//!
//! Pure mapping from a classifier verdict to the title, description, colour
//! tone, icon and haptic feedback the views render. Only an exact `Safe`
//! verdict gets the safe treatment.

use crate::types::{ScanOutcome, Verdict};

pub const SAFE_TITLE: &str = "WEBSITE IS SAFE";
pub const DANGER_TITLE: &str = "⚠️ THREAT DETECTED";
pub const SMS_SAFE_TITLE: &str = "✅ SAFE";

/// Where the scanned URL came from; descriptions differ per source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSource {
    /// Typed into the Home view or passed to `phishguard scan`
    Url,
    /// Decoded from a QR code
    Qr,
    /// Extracted from SMS text
    Sms,
    /// Extracted from the clipboard on resume
    Clipboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Safe,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationIcon {
    Check,
    Warning,
}

/// Vibration feedback, kept as the literal durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticPattern {
    /// One pulse of the given length
    Pulse(u64),
    /// Alternating wait/vibrate durations, starting with a wait
    Pattern(Vec<u64>),
}

impl HapticPattern {
    pub fn safe() -> Self {
        HapticPattern::Pulse(100)
    }

    /// Two long pulses
    pub fn danger() -> Self {
        HapticPattern::Pattern(vec![0, 500, 200, 500])
    }

    /// Number of vibrate phases
    pub fn pulse_count(&self) -> usize {
        match self {
            HapticPattern::Pulse(_) => 1,
            HapticPattern::Pattern(steps) => steps.iter().skip(1).step_by(2).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub tone: Tone,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: PresentationIcon,
    pub haptic: HapticPattern,
}

impl Presentation {
    pub fn is_safe(&self) -> bool {
        self.tone == Tone::Safe
    }
}

/// Build the presentation for a verdict coming from `source`.
pub fn present(verdict: &Verdict, source: ScanSource) -> Presentation {
    if verdict.is_safe() {
        Presentation {
            tone: Tone::Safe,
            title: match source {
                ScanSource::Sms => SMS_SAFE_TITLE,
                _ => SAFE_TITLE,
            },
            description: match source {
                ScanSource::Qr => "This QR code leads to a verified safe website.",
                _ => "This website passed our security checks. It appears safe to visit.",
            },
            icon: PresentationIcon::Check,
            haptic: HapticPattern::safe(),
        }
    } else {
        Presentation {
            tone: Tone::Danger,
            title: DANGER_TITLE,
            description: match source {
                ScanSource::Qr => "Warning! This QR code leads to a potentially malicious site.",
                _ => "This URL shows signs of phishing or malware. Do not enter personal info!",
            },
            icon: PresentationIcon::Warning,
            haptic: HapticPattern::danger(),
        }
    }
}

/// Alert body for an SMS scan: confidence, a blank line, then one line per reason.
pub fn sms_alert_body(outcome: &ScanOutcome) -> String {
    let confidence = outcome
        .confidence
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "n/a".to_string());
    format!("Confidence: {}\n\n{}", confidence, outcome.explanation.join("\n"))
}

/// Title and body of the desktop notification raised by a background scan.
///
/// Returns `None` for verdicts that do not warrant interrupting the user.
pub fn threat_notification(outcome: &ScanOutcome, url: &str) -> Option<(&'static str, String)> {
    outcome
        .result
        .is_threat()
        .then(|| (DANGER_TITLE, format!("Copied link is {}: {}", outcome.result, url)))
}
