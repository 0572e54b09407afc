//! Confirmation dialog widget

use phishguard_app::confirm_dialog::ConfirmDialogState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    widgets::{Clear, Paragraph, Widget},
};

use super::modal_overlay::{button_row, centered_rect, render_shadow};
use crate::theme::styles;

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(44, 7, area);

        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let block = styles::modal_block(&self.state.title, styles::border_active())
            .title_style(styles::accent().add_modifier(Modifier::BOLD))
            .title_alignment(Alignment::Center);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(self.state.message.as_str())
            .style(styles::text_primary())
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let labels = self.state.options.iter().map(|(label, _)| label.as_str());
        Paragraph::new(button_row(labels, self.state.selected))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use phishguard_app::message::ConfirmAction;

    #[test]
    fn test_logout_dialog_renders() {
        let state = ConfirmDialogState::for_action(ConfirmAction::Logout);
        let mut term = TestTerminal::new();
        term.render_widget(ConfirmDialog::new(&state), term.area());
        assert!(term.buffer_contains("Sign Out"));
        assert!(term.buffer_contains("Are you sure?"));
        assert!(term.buffer_contains("[ Cancel ]"));
        assert!(term.buffer_contains("[ Log Out ]"));
    }

    #[test]
    fn test_selected_option_is_highlighted() {
        let mut state = ConfirmDialogState::for_action(ConfirmAction::ClearHistory);
        state.select_next();
        let mut term = TestTerminal::new();
        term.render_widget(ConfirmDialog::new(&state), term.area());

        let content = term.content();
        let row = content
            .lines()
            .position(|l| l.contains("[ Delete ]"))
            .expect("delete button row");
        let line = content.lines().nth(row).unwrap();
        let byte = line.find("[ Delete ]").unwrap();
        let col = line[..byte].chars().count();
        let cell = &term.buffer()[(col as u16, row as u16)];
        assert_eq!(cell.style().bg, styles::focused_selected().bg);
    }
}
