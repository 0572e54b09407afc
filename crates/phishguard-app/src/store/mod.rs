//! Local persistence: key-value store, scan history and session
//!
//! History and session live under separate keys and have independent
//! lifecycles.

pub mod history;
pub mod kv;
pub mod session;

pub use history::{HistoryRecorder, HISTORY_KEY};
pub use kv::KvStore;
pub use session::{SessionStore, SESSION_KEY};

/// All persisted state of one installation
#[derive(Debug, Clone)]
pub struct Stores {
    pub history: HistoryRecorder,
    pub session: SessionStore,
}

impl Stores {
    pub fn open(kv: KvStore, max_history: usize) -> Self {
        Self {
            history: HistoryRecorder::new(kv.clone(), max_history),
            session: SessionStore::new(kv),
        }
    }
}
