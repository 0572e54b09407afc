//! Semantic style builders.

use phishguard_app::confirm_dialog::AlertTone;
use phishguard_core::Tone;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::KEY_HINT)
}

/// "Black on accent" - focused buttons and selected rows
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Verdict styles ---
pub fn tone(tone: Tone) -> Style {
    match tone {
        Tone::Safe => Style::default().fg(palette::SAFE),
        Tone::Danger => Style::default().fg(palette::DANGER),
    }
}

pub fn tone_bold(t: Tone) -> Style {
    tone(t).add_modifier(Modifier::BOLD)
}

pub fn alert_tone(tone: AlertTone) -> Style {
    match tone {
        AlertTone::Info => Style::default().fg(palette::ACCENT),
        AlertTone::Success => Style::default().fg(palette::SAFE),
        AlertTone::Error => Style::default().fg(palette::WARNING),
        AlertTone::Danger => Style::default().fg(palette::DANGER),
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(Style::default().bg(palette::POPUP_BG))
}
