//! Main TUI runner - entry point and event loop

use phishguard_app::config::Settings;
use phishguard_app::{Engine, EnginePaths};
use phishguard_client::Backend;
use phishguard_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI against `backend` until the user quits
pub async fn run<B: Backend>(backend: B, settings: Settings, paths: EnginePaths) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    info!(
        "Starting TUI: auto_scan_clipboard={}, notifications={}",
        settings.behavior.auto_scan_clipboard, settings.behavior.notifications
    );

    let mut term = ratatui::init();
    if let Err(e) = terminal::enable_focus_reporting() {
        // Without focus events the clipboard auto-scan never fires
        warn!("Terminal focus reporting unavailable: {}", e);
    }

    let mut engine = Engine::new(backend, settings, paths);
    engine.start();

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    terminal::disable_focus_reporting();
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<B: Backend>(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine<B>,
) -> Result<()> {
    while !engine.should_quit() {
        // Results from background tasks
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("TUI loop finished");
    Ok(())
}
