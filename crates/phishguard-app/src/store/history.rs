//! Scan history: newest-first list of past verdicts under `scanHistory`

use chrono::{DateTime, Local};
use phishguard_core::prelude::*;
use phishguard_core::{HistoryEntry, HistoryStats, ScanOutcome};

use super::kv::KvStore;

/// Store key of the history list
pub const HISTORY_KEY: &str = "scanHistory";

/// Appends scan results to the persisted history
#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    store: KvStore,
    /// `0` means unlimited
    max_entries: usize,
}

impl HistoryRecorder {
    pub fn new(store: KvStore, max_entries: usize) -> Self {
        Self { store, max_entries }
    }

    /// Record a successful scan at index 0.
    ///
    /// `url` is what gets logged: the server echo for typed and SMS scans,
    /// the decoded payload for QR scans. Entries past `max_entries` are
    /// dropped from the tail.
    pub fn record(
        &self,
        outcome: &ScanOutcome,
        url: &str,
        at: DateTime<Local>,
    ) -> Result<HistoryEntry> {
        let max_entries = self.max_entries;

        self.store
            .update(HISTORY_KEY, |current: Option<Vec<HistoryEntry>>| {
                let mut entries = current.unwrap_or_default();
                let mut entry = HistoryEntry::from_outcome(outcome, url, at);

                // Same-millisecond scans get the next free id
                if let Some(mut millis) = entry.id_millis() {
                    while entries.iter().any(|e| e.id == entry.id) {
                        millis += 1;
                        entry.id = millis.to_string();
                    }
                }

                entries.insert(0, entry.clone());
                if max_entries > 0 && entries.len() > max_entries {
                    let dropped = entries.len() - max_entries;
                    entries.truncate(max_entries);
                    debug!("History cap {} reached, dropped {} entries", max_entries, dropped);
                }

                Ok((entries, entry))
            })
            .inspect(|entry| info!("Recorded {} -> {}", entry.url, entry.result))
    }

    /// All entries, newest first. Missing history is an empty list.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .store
            .get::<Vec<HistoryEntry>>(HISTORY_KEY)?
            .unwrap_or_default())
    }

    /// Delete every entry. The session is untouched.
    pub fn clear(&self) -> Result<()> {
        info!("Clearing scan history");
        self.store.remove(HISTORY_KEY)
    }

    pub fn stats(&self) -> Result<HistoryStats> {
        Ok(HistoryStats::from_entries(&self.load()?))
    }
}
