//! Haptic feedback rendered as terminal bells

use std::io::Write;
use std::time::Duration;

use phishguard_core::prelude::*;
use phishguard_core::HapticPattern;

const BEL: &[u8] = b"\x07";

/// Play `pattern` into `out`: one bell per vibrate phase, sleeping through
/// the wait phases. Vibrate durations are not observable on a terminal bell.
pub async fn play_into<W: Write>(pattern: &HapticPattern, out: &mut W) -> Result<()> {
    match pattern {
        HapticPattern::Pulse(_) => {
            out.write_all(BEL)?;
        }
        HapticPattern::Pattern(steps) => {
            for (i, ms) in steps.iter().enumerate() {
                if i % 2 == 0 {
                    if *ms > 0 {
                        tokio::time::sleep(Duration::from_millis(*ms)).await;
                    }
                } else {
                    out.write_all(BEL)?;
                    out.flush()?;
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Plays haptic patterns on the controlling terminal
#[derive(Debug, Clone, Copy)]
pub struct Haptics {
    enabled: bool,
}

impl Haptics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Fire and forget; failures are logged.
    pub fn play(&self, pattern: HapticPattern) {
        if !self.enabled {
            return;
        }
        tokio::spawn(async move {
            let mut out = std::io::stderr();
            if let Err(e) = play_into(&pattern, &mut out).await {
                debug!("Haptic playback failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_safe_pulse_rings_once() {
        let mut out = Vec::new();
        play_into(&HapticPattern::safe(), &mut out).await.unwrap();
        assert_eq!(out, b"\x07");
    }

    #[tokio::test]
    async fn test_danger_pattern_rings_twice() {
        let mut out = Vec::new();
        play_into(&HapticPattern::danger(), &mut out).await.unwrap();
        assert_eq!(out, b"\x07\x07");
    }

    #[tokio::test]
    async fn test_play_does_not_wait_for_the_pattern() {
        let started = std::time::Instant::now();
        Haptics::new(true).play(HapticPattern::danger());
        Haptics::new(false).play(HapticPattern::danger());
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
