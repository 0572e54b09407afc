//! Cached login session under `user_session`

use phishguard_core::prelude::*;
use phishguard_core::UserSession;

use super::kv::KvStore;

/// Store key of the session document
pub const SESSION_KEY: &str = "user_session";

#[derive(Debug, Clone)]
pub struct SessionStore {
    store: KvStore,
}

impl SessionStore {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Whether a session is stored. Presence alone means "logged in".
    pub fn exists(&self) -> bool {
        self.store.contains(SESSION_KEY)
    }

    /// The stored session. An unreadable document is logged and treated as
    /// no session.
    pub fn load(&self) -> Option<UserSession> {
        match self.store.get::<UserSession>(SESSION_KEY) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring unreadable session: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &UserSession) -> Result<()> {
        self.store.set(SESSION_KEY, session)?;
        debug!("Saved session for {}", session.email);
        Ok(())
    }

    /// Log out. History is not touched.
    pub fn remove(&self) -> Result<()> {
        info!("Removing user session");
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{HistoryRecorder, HISTORY_KEY};
    use chrono::Local;
    use phishguard_core::{ScanOutcome, Verdict};
    use tempfile::TempDir;

    #[test]
    fn test_save_load_remove() {
        let dir = TempDir::new().unwrap();
        let sessions = SessionStore::new(KvStore::new(dir.path()));
        assert!(!sessions.exists());
        assert_eq!(sessions.load(), None);

        let session = UserSession::new("user@gmail.com");
        sessions.save(&session).unwrap();
        assert!(sessions.exists());
        assert_eq!(sessions.load(), Some(session));

        sessions.remove().unwrap();
        assert!(!sessions.exists());
    }

    #[test]
    fn test_corrupt_session_reads_as_none() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("user_session.json"), "][").unwrap();
        let sessions = SessionStore::new(KvStore::new(dir.path()));
        assert_eq!(sessions.load(), None);
    }

    #[test]
    fn test_logout_keeps_history() {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::new(dir.path());
        let sessions = SessionStore::new(kv.clone());
        let history = HistoryRecorder::new(kv.clone(), 0);

        sessions.save(&UserSession::new("user@gmail.com")).unwrap();
        history
            .record(&ScanOutcome::new(Verdict::Safe, "a.com"), "a.com", Local::now())
            .unwrap();

        sessions.remove().unwrap();
        assert!(kv.contains(HISTORY_KEY));
        assert_eq!(history.load().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_history_keeps_session() {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::new(dir.path());
        let sessions = SessionStore::new(kv.clone());
        let history = HistoryRecorder::new(kv, 0);

        sessions.save(&UserSession::new("user@gmail.com")).unwrap();
        history
            .record(&ScanOutcome::new(Verdict::Safe, "a.com"), "a.com", Local::now())
            .unwrap();

        history.clear().unwrap();
        assert!(sessions.exists());
    }
}
