//! Icon set for the TUI.
//!
//! `IconSet` resolves icons at runtime based on `IconMode`.
//! - `IconMode::Unicode` — safe characters that work in all terminals
//! - `IconMode::NerdFonts` — rich Nerd Font glyphs (requires Nerd Font installed)

use phishguard_app::config::IconMode;

/// Braille spinner frames shown while a request is in flight
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Runtime icon resolver.
#[derive(Debug, Clone, Copy)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    pub fn shield(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f132}", // nf-fa-shield
            IconMode::Unicode => "\u{25c8}",   // ◈
        }
    }

    pub fn check(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f058}", // nf-fa-check_circle
            IconMode::Unicode => "\u{2714}",   // ✔
        }
    }

    pub fn warning(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f071}", // nf-fa-warning
            IconMode::Unicode => "\u{26a0}",   // ⚠
        }
    }

    pub fn link(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f0c1}", // nf-fa-link
            IconMode::Unicode => "\u{21aa}",   // ↪
        }
    }

    pub fn user(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f007}", // nf-fa-user
            IconMode::Unicode => "\u{263a}",   // ☺
        }
    }

    pub fn bell(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f0f3}", // nf-fa-bell
            IconMode::Unicode => "\u{266a}",   // ♪
        }
    }

    pub fn dot(&self) -> &'static str {
        match self.mode {
            IconMode::NerdFonts => "\u{f444}", // nf-oct-dot_fill
            IconMode::Unicode => "\u{25cf}",   // ●
        }
    }

    /// Spinner frame for an ever-increasing tick counter
    pub fn spinner(&self, frame: usize) -> &'static str {
        SPINNER[frame % SPINNER.len()]
    }
}
