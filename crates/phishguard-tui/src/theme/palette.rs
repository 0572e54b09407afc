//! Color palette.
//!
//! Brand colours are RGB; neutral layers stay on named colours so the
//! terminal theme shows through.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Reset;
pub const CARD_BG: Color = Color::Reset;
pub const POPUP_BG: Color = Color::Rgb(45, 52, 54); // #2d3436

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Rgb(9, 132, 227); // #0984e3

// --- Accent ---
pub const ACCENT: Color = Color::Rgb(9, 132, 227); // #0984e3
pub const ACCENT_ALT: Color = Color::Rgb(0, 210, 211); // #00d2d3

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(178, 190, 195); // #b2bec3
pub const TEXT_MUTED: Color = Color::Rgb(99, 110, 114); // #636e72
pub const CONTRAST_FG: Color = Color::Black;

// --- Verdict / status ---
pub const SAFE: Color = Color::Rgb(0, 184, 148); // #00b894
pub const DANGER: Color = Color::Rgb(214, 48, 49); // #d63031
pub const WARNING: Color = Color::Rgb(230, 126, 34); // #e67e22
pub const KEY_HINT: Color = Color::Yellow;

// --- Effects ---
pub const SHADOW: Color = Color::Black;
