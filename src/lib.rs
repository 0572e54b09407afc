//! PhishGuard
//!
//! Terminal client for the PhishGuard phishing-detection service. Without a
//! subcommand the binary starts the TUI; subcommands run one operation and
//! print the result as text or NDJSON.

pub mod cli;
pub mod headless;

pub use cli::{Args, Command, Credentials};
pub use headless::runner::{run_command, CommandStatus};
pub use headless::{CliEvent, Output};
