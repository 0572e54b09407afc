//! Engine - shared orchestration state for the TUI runner and tests
//!
//! The Engine owns the application state, the message channel, the
//! per-view task map and the context actions run with.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use phishguard_client::{Backend, Clipboard, Haptics, Notifier};
use phishguard_core::prelude::*;
use tokio::sync::mpsc;

use crate::actions::{cancel_view_tasks, ActionContext, ViewTaskMap};
use crate::config::Settings;
use crate::message::Message;
use crate::navigation::{NavAction, View};
use crate::process;
use crate::state::AppState;
use crate::store::{KvStore, Stores};

/// Capacity of the unified message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Where an engine persists its data
#[derive(Debug, Clone)]
pub struct EnginePaths {
    /// Key-value store directory (`user_session`, `scanHistory`)
    pub store_dir: PathBuf,
    /// Directory holding `config.toml`
    pub config_dir: PathBuf,
}

/// Orchestration engine for PhishGuard.
///
/// Encapsulates:
/// - TEA state management
/// - Message channel
/// - Per-view task tracking for cancellation
/// - Backend, stores and device services used by actions
pub struct Engine<B: Backend> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (terminal events, ticks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    ctx: ActionContext<B>,
}

impl<B: Backend> Engine<B> {
    /// Create an engine with device services detected from the host
    pub fn new(backend: B, settings: Settings, paths: EnginePaths) -> Self {
        let haptics = Haptics::new(settings.behavior.haptics);
        Self::with_devices(
            backend,
            settings,
            paths,
            Clipboard::detect(),
            Notifier::detect(),
            haptics,
        )
    }

    /// Create an engine with explicit device services
    pub fn with_devices(
        backend: B,
        settings: Settings,
        paths: EnginePaths,
        clipboard: Clipboard,
        notifier: Notifier,
        haptics: Haptics,
    ) -> Self {
        let stores = Stores::open(
            KvStore::new(paths.store_dir),
            settings.history.max_entries,
        );
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let view_tasks: ViewTaskMap = Arc::new(std::sync::Mutex::new(HashMap::new()));

        let ctx = ActionContext {
            backend: Arc::new(backend),
            stores,
            clipboard,
            notifier,
            haptics,
            config_dir: paths.config_dir,
            view_tasks,
        };

        Self {
            state: AppState::with_settings(settings),
            msg_tx,
            msg_rx,
            ctx,
        }
    }

    /// Pick the first view from the session store
    pub fn start(&mut self) {
        let has_session = self.ctx.stores.session.exists();
        info!(
            "Starting {} session",
            if has_session { "with" } else { "without" }
        );
        self.process_message(Message::Navigate(NavAction::Startup { has_session }));
    }

    /// Process a single message through the TEA update cycle
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.ctx);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task and process it.
    ///
    /// Returns `false` if the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn stores(&self) -> &Stores {
        &self.ctx.stores
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Abort every outstanding background task
    pub fn shutdown(&mut self) {
        let views: Vec<View> = match self.ctx.view_tasks.lock() {
            Ok(map) => map.keys().copied().collect(),
            Err(e) => {
                warn!("View task map poisoned: {}", e);
                return;
            }
        };
        for view in views {
            cancel_view_tasks(&self.ctx.view_tasks, view);
        }
    }
}
