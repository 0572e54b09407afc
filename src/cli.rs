//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Environment variable read when `--password` is not given
pub const PASSWORD_ENV: &str = "PHISHGUARD_PASSWORD";

/// PhishGuard - check links against an AI phishing detector
#[derive(Parser, Debug)]
#[command(name = "phishguard")]
#[command(version, about = "Check links against the PhishGuard phishing detector", long_about = None)]
pub struct Args {
    /// Scan service base URL (overrides config.toml and PHISHGUARD_SERVER_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Print one JSON object per line instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Run one operation instead of the TUI
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan a website URL
    Scan {
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Scan the first link found in a message
    Sms {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Scan the website encoded in a QR code image
    Qr {
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },

    /// List past scans, newest first
    History {
        /// Delete every entry instead
        #[arg(long)]
        clear: bool,
    },

    /// Log in and cache the session
    Login(Credentials),

    /// Create an account and cache the session
    Register(Credentials),

    /// Forget the cached session (history is kept)
    Logout,

    /// Show the cached session
    Whoami,
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Gmail address
    #[arg(long)]
    pub email: String,

    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_starts_tui() {
        let args = Args::try_parse_from(["phishguard"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.json);
        assert!(args.server.is_none());
    }

    #[test]
    fn test_scan_with_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "phishguard",
            "scan",
            "http://example.com",
            "--json",
            "--server",
            "http://localhost:5000",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Some(Command::Scan {
                url: "http://example.com".into()
            })
        );
        assert!(args.json);
        assert_eq!(args.server.as_deref(), Some("http://localhost:5000"));
    }

    #[test]
    fn test_history_clear_flag() {
        let args = Args::try_parse_from(["phishguard", "history", "--clear"]).unwrap();
        assert_eq!(args.command, Some(Command::History { clear: true }));

        let args = Args::try_parse_from(["phishguard", "history"]).unwrap();
        assert_eq!(args.command, Some(Command::History { clear: false }));
    }

    #[test]
    fn test_login_takes_explicit_password() {
        let args = Args::try_parse_from([
            "phishguard",
            "login",
            "--email",
            "me@gmail.com",
            "--password",
            "abcdefg1!",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Some(Command::Login(Credentials {
                email: "me@gmail.com".into(),
                password: "abcdefg1!".into(),
            }))
        );
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["phishguard", "frobnicate"]).is_err());
    }
}
