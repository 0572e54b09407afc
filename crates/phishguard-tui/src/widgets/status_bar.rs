//! Bottom status bar: loading indicator and key hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

/// One row of `[key] action` hints, prefixed by a spinner while busy
pub struct StatusBar<'a> {
    hints: &'a [(&'a str, &'a str)],
    busy: Option<(&'a str, &'a str)>,
}

impl<'a> StatusBar<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)]) -> Self {
        Self { hints, busy: None }
    }

    /// Show `spinner` and `label` before the hints
    pub fn busy(mut self, spinner: &'a str, label: &'a str) -> Self {
        self.busy = Some((spinner, label));
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(" ")];
        if let Some((spinner, label)) = self.busy {
            spans.push(Span::styled(spinner, styles::accent()));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label, styles::accent_bold()));
            spans.push(Span::raw("   "));
        }
        for (key, action) in self.hints {
            spans.push(Span::styled("[", styles::text_muted()));
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!("] {}  ", action), styles::text_muted()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_hints() {
        let mut term = TestTerminal::with_size(60, 1);
        term.render_widget(
            StatusBar::new(&[("Enter", "Scan"), ("Ctrl+C", "Quit")]),
            term.area(),
        );
        assert!(term.buffer_contains("[Enter] Scan"));
        assert!(term.buffer_contains("[Ctrl+C] Quit"));
    }

    #[test]
    fn test_busy_prefix() {
        let mut term = TestTerminal::with_size(60, 1);
        term.render_widget(
            StatusBar::new(&[("Esc", "Back")]).busy("⠋", "Scanning..."),
            term.area(),
        );
        assert!(term.buffer_contains("⠋ Scanning..."));
    }
}
