//! Terminal setup and restoration

use std::io::stdout;

use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::execute;
use phishguard_core::prelude::*;

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableFocusChange);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Ask the terminal to report focus gained/lost events
pub fn enable_focus_reporting() -> Result<()> {
    execute!(stdout(), EnableFocusChange)?;
    Ok(())
}

pub fn disable_focus_reporting() {
    if let Err(e) = execute!(stdout(), DisableFocusChange) {
        warn!("Failed to disable focus reporting: {}", e);
    }
}
