//! Action handlers: UpdateAction dispatch and background task spawning

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use phishguard_client::{Backend, Clipboard, Haptics, Notifier};
use phishguard_core::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config;
use crate::handler::UpdateAction;
use crate::message::{Message, RequestError};
use crate::navigation::View;
use crate::store::Stores;
use crate::workflow::{self, blocking};

/// A background task started on behalf of a view
pub struct ViewTask {
    handle: JoinHandle<()>,
    /// Flipped to `true` before the task is aborted
    shutdown_tx: watch::Sender<bool>,
}

/// Background tasks started on behalf of each view
pub type ViewTaskMap = Arc<std::sync::Mutex<HashMap<View, Vec<ViewTask>>>>;

/// Everything a spawned action may touch
pub struct ActionContext<B: Backend> {
    pub backend: Arc<B>,
    pub stores: Stores,
    pub clipboard: Clipboard,
    pub notifier: Notifier,
    pub haptics: Haptics,
    /// Directory `config.toml` is saved to
    pub config_dir: PathBuf,
    pub view_tasks: ViewTaskMap,
}

impl<B: Backend> Clone for ActionContext<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            stores: self.stores.clone(),
            clipboard: self.clipboard.clone(),
            notifier: self.notifier.clone(),
            haptics: self.haptics,
            config_dir: self.config_dir.clone(),
            view_tasks: self.view_tasks.clone(),
        }
    }
}

/// Spawn the future built by `task` and track it under `view` so navigation
/// can abort it. The future receives the view's shutdown signal, which is
/// set just before the abort.
fn spawn_for_view<T, F>(view_tasks: &ViewTaskMap, view: View, task: T)
where
    T: FnOnce(watch::Receiver<bool>) -> F,
    F: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(task(shutdown_rx));
    match view_tasks.lock() {
        Ok(mut map) => {
            let tasks = map.entry(view).or_default();
            tasks.retain(|t| !t.handle.is_finished());
            tasks.push(ViewTask {
                handle,
                shutdown_tx,
            });
        }
        Err(e) => warn!("View task map poisoned, task for {:?} untracked: {}", view, e),
    }
}

/// Signal and abort every tracked task of `view`
pub fn cancel_view_tasks(view_tasks: &ViewTaskMap, view: View) {
    let tasks = match view_tasks.lock() {
        Ok(mut map) => map.remove(&view).unwrap_or_default(),
        Err(e) => {
            warn!("View task map poisoned: {}", e);
            return;
        }
    };
    let running = tasks.iter().filter(|t| !t.handle.is_finished()).count();
    for task in tasks {
        task.shutdown_tx.send_replace(true);
        task.handle.abort();
    }
    if running > 0 {
        debug!("Cancelled {} task(s) of {:?}", running, view);
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Message channel closed; dropping task result");
    }
}

/// Execute an action, spawning background work where needed
pub fn handle_action<B: Backend>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    ctx: &ActionContext<B>,
) {
    match action {
        UpdateAction::Scan {
            view,
            request,
            url,
            record,
        } => {
            let backend = ctx.backend.clone();
            let history = ctx.stores.history.clone();
            spawn_for_view(&ctx.view_tasks, view, |shutdown_rx| async move {
                let report = workflow::scan_and_record(
                    &*backend,
                    &history,
                    &url,
                    Some(record),
                    Some(shutdown_rx),
                )
                .await;
                let (result, recorded) = match report {
                    Ok(report) => (
                        Ok(report.outcome),
                        report.recorded.map(|r| r.map_err(RequestError::from)),
                    ),
                    Err(e) => (Err(RequestError::from(e)), None),
                };
                send(
                    &msg_tx,
                    Message::ScanCompleted {
                        view,
                        request,
                        url,
                        result,
                        recorded,
                    },
                )
                .await;
            });
        }

        UpdateAction::AutoScan { url } => {
            let backend = ctx.backend.clone();
            let history = ctx.stores.history.clone();
            tokio::spawn(async move {
                let result = workflow::scan_and_record(&*backend, &history, &url, None, None)
                    .await
                    .map(|report| report.outcome)
                    .map_err(RequestError::from);
                send(&msg_tx, Message::AutoScanCompleted { url, result }).await;
            });
        }

        UpdateAction::DecodeQr { request, path } => {
            spawn_for_view(&ctx.view_tasks, View::Qr, |_| async move {
                let result = workflow::decode_qr(path).await.map_err(RequestError::from);
                send(&msg_tx, Message::QrDecoded { request, result }).await;
            });
        }

        UpdateAction::Authenticate {
            request,
            mode,
            email,
            password,
        } => {
            let backend = ctx.backend.clone();
            let sessions = ctx.stores.session.clone();
            spawn_for_view(&ctx.view_tasks, View::Auth, |_| async move {
                let result =
                    workflow::authenticate_and_store(&*backend, &sessions, mode, &email, &password)
                        .await
                        .map_err(RequestError::from);
                send(&msg_tx, Message::AuthCompleted { request, result }).await;
            });
        }

        UpdateAction::UpdateProfile {
            request,
            session,
            name,
            photo,
        } => {
            let backend = ctx.backend.clone();
            let sessions = ctx.stores.session.clone();
            spawn_for_view(&ctx.view_tasks, View::Profile, |_| async move {
                let result = workflow::update_profile_and_store(
                    &*backend, &sessions, &session, &name, &photo,
                )
                .await
                .map_err(RequestError::from);
                send(&msg_tx, Message::ProfileSaved { request, result }).await;
            });
        }

        UpdateAction::ReadClipboard { purpose, delay } => {
            let clipboard = ctx.clipboard.clone();
            tokio::spawn(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let result = clipboard.read_text().await.map_err(RequestError::from);
                send(&msg_tx, Message::ClipboardRead { purpose, result }).await;
            });
        }

        UpdateAction::LoadHistory => {
            let history = ctx.stores.history.clone();
            tokio::spawn(async move {
                let result = blocking(move || history.load())
                    .await
                    .context("Failed to load history")
                    .map_err(RequestError::from);
                send(&msg_tx, Message::HistoryLoaded { result }).await;
            });
        }

        UpdateAction::ClearHistory => {
            let history = ctx.stores.history.clone();
            tokio::spawn(async move {
                let result = blocking(move || history.clear())
                    .await
                    .context("Failed to clear history")
                    .map_err(RequestError::from);
                send(&msg_tx, Message::HistoryCleared { result }).await;
            });
        }

        UpdateAction::LoadProfile => {
            let stores = ctx.stores.clone();
            spawn_for_view(&ctx.view_tasks, View::Profile, |_| async move {
                let (session, stats) = workflow::load_profile(&stores).await;
                let stats = stats.map_err(RequestError::from);
                send(&msg_tx, Message::ProfileLoaded { session, stats }).await;
            });
        }

        UpdateAction::RemoveSession => {
            let sessions = ctx.stores.session.clone();
            tokio::spawn(async move {
                let _ = blocking(move || sessions.remove())
                    .await
                    .context("Failed to remove session");
            });
        }

        UpdateAction::SaveSettings { settings } => {
            let dir = ctx.config_dir.clone();
            tokio::spawn(async move {
                let result = blocking(move || config::save_settings(&dir, &settings))
                    .await
                    .context("Failed to save settings")
                    .map_err(RequestError::from);
                send(&msg_tx, Message::SettingsSaved { result }).await;
            });
        }

        UpdateAction::Notify { title, body } => {
            let notifier = ctx.notifier.clone();
            tokio::spawn(async move {
                notifier.notify(&title, &body).await;
            });
        }

        UpdateAction::PlayHaptic(pattern) => ctx.haptics.play(pattern),

        UpdateAction::CancelViewTasks { view } => cancel_view_tasks(&ctx.view_tasks, view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_map() -> ViewTaskMap {
        Arc::new(std::sync::Mutex::new(HashMap::new()))
    }

    #[tokio::test]
    async fn test_cancel_signals_before_abort() {
        let view_tasks = task_map();
        let (seen_tx, seen_rx) = std::sync::mpsc::channel();

        spawn_for_view(&view_tasks, View::Home, |shutdown_rx| {
            seen_tx.send(shutdown_rx.clone()).unwrap();
            async move {
                std::future::pending::<()>().await;
            }
        });
        let shutdown_rx = seen_rx.recv().unwrap();
        assert!(!*shutdown_rx.borrow());

        cancel_view_tasks(&view_tasks, View::Home);

        assert!(*shutdown_rx.borrow());
        assert!(view_tasks.lock().unwrap().get(&View::Home).is_none());
    }

    #[tokio::test]
    async fn test_cancel_leaves_other_views_running() {
        let view_tasks = task_map();
        let (seen_tx, seen_rx) = std::sync::mpsc::channel();

        for view in [View::Home, View::Sms] {
            let seen_tx = seen_tx.clone();
            spawn_for_view(&view_tasks, view, move |shutdown_rx| {
                seen_tx.send((view, shutdown_rx)).unwrap();
                std::future::pending::<()>()
            });
        }
        let signals: HashMap<View, watch::Receiver<bool>> = seen_rx.try_iter().collect();

        cancel_view_tasks(&view_tasks, View::Home);

        assert!(*signals[&View::Home].borrow());
        assert!(!*signals[&View::Sms].borrow());
        assert_eq!(view_tasks.lock().unwrap()[&View::Sms].len(), 1);
    }
}
