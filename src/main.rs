//! PhishGuard - terminal client for the PhishGuard phishing detector
//!
//! This is the binary entry point. All logic lives in the library crates.

use clap::Parser;
use phishguard::{run_command, Args, Output};
use phishguard_app::config::{config_dir, load_effective_settings, store_dir};
use phishguard_app::{EnginePaths, KvStore, Stores};
use phishguard_client::ApiClient;
use phishguard_core::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to a file; stdout belongs to the TUI or to command output
    if let Err(e) = phishguard_core::logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let mut settings = load_effective_settings();
    if let Some(server) = args.server {
        settings.server.base_url = server;
    }
    info!(
        "Using scan service {} (timeout {}s)",
        settings.server.base_url, settings.server.request_timeout_secs
    );

    let client = ApiClient::new(&settings.server.base_url, settings.server.request_timeout())?;

    let Some(command) = args.command else {
        color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
        let paths = EnginePaths {
            store_dir: store_dir(),
            config_dir: config_dir(),
        };
        return phishguard_tui::run(client, settings, paths).await;
    };

    let stores = Stores::open(KvStore::new(store_dir()), settings.history.max_entries);
    let mut out = Output::stdout(args.json);
    let status = run_command(command, &client, &stores, &mut out).await?;

    let code = status.exit_code();
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
