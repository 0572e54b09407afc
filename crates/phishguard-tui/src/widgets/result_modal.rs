//! Scan result modal for the Home and QR views

use phishguard_app::confirm_dialog::ResultModal;
use phishguard_core::PresentationIcon;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal_overlay::{button_row, centered_rect, render_shadow, wrapped_height};
use crate::theme::{icons::IconSet, styles};

const MODAL_WIDTH: u16 = 64;

pub struct ScanResultModal<'a> {
    modal: &'a ResultModal,
    icons: IconSet,
}

impl<'a> ScanResultModal<'a> {
    pub fn new(modal: &'a ResultModal, icons: IconSet) -> Self {
        Self { modal, icons }
    }

    /// Detail rows below the description, as plain label/value pairs
    fn details(&self) -> Vec<(&'static str, String)> {
        let outcome = &self.modal.outcome;
        let mut rows = vec![
            ("URL", self.modal.url.clone()),
            ("Verdict", outcome.result.to_string()),
        ];
        if let Some(confidence) = &outcome.confidence {
            rows.push(("Confidence", confidence.to_string()));
        }
        rows
    }

    fn body(&self) -> Text<'static> {
        let p = &self.modal.presentation;
        let mut lines = vec![
            Line::styled(p.description, styles::text_secondary()),
            Line::raw(""),
        ];
        for (label, value) in self.details() {
            let value_style = if label == "Verdict" {
                styles::tone_bold(p.tone)
            } else {
                styles::text_primary()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", label), styles::text_muted()),
                Span::styled(value, value_style),
            ]));
        }
        if !self.modal.outcome.explanation.is_empty() {
            lines.push(Line::raw(""));
            for reason in &self.modal.outcome.explanation {
                lines.push(Line::styled(format!("• {}", reason), styles::text_primary()));
            }
        }
        Text::from(lines)
    }
}

impl Widget for ScanResultModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = &self.modal.presentation;
        let width = MODAL_WIDTH.min(area.width);
        let text_width = width.saturating_sub(4);

        let body = self.body();
        let body_rows: u16 = body
            .lines
            .iter()
            .map(|line| {
                let plain: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                wrapped_height(&plain, text_width)
            })
            .sum();
        // Borders, headline, spacer, body, spacer, buttons
        let height = body_rows.saturating_add(6);
        let modal = centered_rect(width, height, area);

        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let tone = styles::tone(p.tone);
        let block = styles::modal_block("Scan Result", tone).title_alignment(Alignment::Center);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Headline
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
        ])
        .horizontal_margin(1)
        .split(inner);

        let icon = match p.icon {
            PresentationIcon::Check => self.icons.check(),
            PresentationIcon::Warning => self.icons.warning(),
        };
        let headline = Line::from(vec![
            Span::styled(icon, styles::tone_bold(p.tone)),
            Span::raw("  "),
            Span::styled(p.title, styles::tone_bold(p.tone)),
        ]);
        Paragraph::new(headline)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        let labels = self.modal.options.iter().map(|(label, _)| label.as_str());
        Paragraph::new(button_row(labels, self.modal.selected))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}
