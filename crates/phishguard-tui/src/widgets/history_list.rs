//! Scan history list

use phishguard_core::{HistoryEntry, HistoryStats, Tone};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::{icons::IconSet, styles};

/// Width of the verdict column
const VERDICT_WIDTH: usize = 11;

pub struct HistoryList<'a> {
    entries: &'a [HistoryEntry],
    selected: usize,
    icons: IconSet,
}

impl<'a> HistoryList<'a> {
    pub fn new(entries: &'a [HistoryEntry], selected: usize, icons: IconSet) -> Self {
        Self {
            entries,
            selected,
            icons,
        }
    }

    fn row(&self, entry: &HistoryEntry, width: usize) -> ListItem<'static> {
        let tone = if entry.result.is_safe() {
            Tone::Safe
        } else {
            Tone::Danger
        };
        let icon = if entry.result.is_safe() {
            self.icons.check()
        } else {
            self.icons.warning()
        };

        // icon + gaps + verdict + date
        let fixed = 2 + VERDICT_WIDTH + 1 + entry.date.width() + 2;
        let url = truncate(&entry.url, width.saturating_sub(fixed).max(8));
        let pad = width
            .saturating_sub(fixed)
            .saturating_sub(url.width());

        ListItem::new(Line::from(vec![
            Span::styled(format!("{} ", icon), styles::tone(tone)),
            Span::styled(
                format!("{:<w$} ", entry.result.as_str(), w = VERDICT_WIDTH),
                styles::tone_bold(tone),
            ),
            Span::styled(url, styles::text_primary()),
            Span::raw(" ".repeat(pad + 2)),
            Span::styled(entry.date.clone(), styles::text_muted()),
        ]))
    }
}

/// Cut `text` to `max` display columns, ending in an ellipsis when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Widget for HistoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats = HistoryStats::from_entries(self.entries);
        let block = styles::glass_block(true).title(Span::styled(
            format!(" {} scans · {} threats ", stats.total, stats.threats),
            styles::text_secondary(),
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            let empty = vec![
                Line::raw(""),
                Line::styled("No scans yet", styles::text_secondary()),
                Line::styled("Scanned links show up here.", styles::text_muted()),
            ];
            Paragraph::new(empty)
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        // Highlight symbol takes two columns
        let width = usize::from(inner.width).saturating_sub(2);
        let items: Vec<ListItem> = self.entries.iter().map(|e| self.row(e, width)).collect();
        let list = List::new(items)
            .highlight_style(styles::focused_selected())
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.min(self.entries.len() - 1)));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}
