//! Alert dialog: title, body and a single dismiss button

use phishguard_app::confirm_dialog::AlertState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal_overlay::{button_row, centered_rect, fit_width, render_shadow, wrapped_height};
use crate::theme::styles;

pub struct AlertDialog<'a> {
    state: &'a AlertState,
}

impl<'a> AlertDialog<'a> {
    pub fn new(state: &'a AlertState) -> Self {
        Self { state }
    }
}

impl Widget for AlertDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = fit_width(
            self.state
                .body
                .lines()
                .chain([self.state.title.as_str(), self.state.button.as_str()]),
            30,
            64,
        )
        .min(area.width);
        let body_rows = wrapped_height(&self.state.body, width.saturating_sub(4));
        // Borders, padding rows, body, spacer, button
        let height = body_rows.saturating_add(5);
        let modal = centered_rect(width, height, area);

        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let tone = styles::alert_tone(self.state.tone);
        let block = styles::modal_block(&self.state.title, tone)
            .title_style(tone.add_modifier(Modifier::BOLD))
            .title_alignment(Alignment::Center);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .horizontal_margin(1)
        .split(inner);

        Paragraph::new(self.state.body.as_str())
            .style(styles::text_primary())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);

        Paragraph::new(button_row([self.state.button.as_str()], 0))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use phishguard_app::message::Message;

    #[test]
    fn test_alert_renders_title_body_and_button() {
        let state = AlertState::error("Connection Error", "Could not connect to server.");
        let mut term = TestTerminal::new();
        term.render_widget(AlertDialog::new(&state), term.area());
        assert!(term.buffer_contains("Connection Error"));
        assert!(term.buffer_contains("Could not connect to server."));
        assert!(term.buffer_contains("[ OK ]"));
    }

    #[test]
    fn test_alert_shows_follow_up_button_label() {
        let state = AlertState::error("Not a Website", "This QR code contains text, not a URL.")
            .then("Scan Again", Message::QrScanNext);
        let mut term = TestTerminal::new();
        term.render_widget(AlertDialog::new(&state), term.area());
        assert!(term.buffer_contains("[ Scan Again ]"));
    }

    #[test]
    fn test_multiline_body() {
        let state = AlertState::info("⚠️ THREAT DETECTED", "Confidence: 0.97\n\nIP in host\nLogin form");
        let mut term = TestTerminal::new();
        term.render_widget(AlertDialog::new(&state), term.area());
        assert!(term.buffer_contains("THREAT DETECTED"));
        assert!(term.buffer_contains("Confidence: 0.97"));
        assert!(term.buffer_contains("IP in host"));
        assert!(term.buffer_contains("Login form"));
    }

    #[test]
    fn test_fits_compact_terminal() {
        let state = AlertState::error("Empty URL", "Please enter a website link.");
        let mut term = TestTerminal::compact();
        term.render_widget(AlertDialog::new(&state), term.area());
        assert!(term.buffer_contains("Empty URL"));
    }
}
