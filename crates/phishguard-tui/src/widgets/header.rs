//! Header bar widget
//!
//! App title and current view on the first row, the view tabs below once
//! signed in.

use phishguard_app::navigation::View;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons::IconSet, palette, styles};

use super::ViewTabs;

pub struct MainHeader {
    view: View,
    icons: IconSet,
    auto_scan: bool,
}

impl MainHeader {
    pub fn new(view: View, icons: IconSet) -> Self {
        Self {
            view,
            icons,
            auto_scan: false,
        }
    }

    /// Show the clipboard watch indicator on the right
    pub fn auto_scan(mut self, enabled: bool) -> Self {
        self.auto_scan = enabled;
        self
    }
}

impl Widget for MainHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.icons.shield(), styles::accent()),
            Span::raw(" "),
            Span::styled("PhishGuard", styles::accent_bold()),
            Span::styled(" / ", styles::text_muted()),
            Span::styled(self.view.title(), styles::text_secondary()),
        ]);
        let title_width = title.width() as u16;
        buf.set_line(inner.x, inner.y, &title, inner.width);

        if self.auto_scan && self.view != View::Auth {
            let pill = Line::from(vec![
                Span::styled(self.icons.dot(), Style::default().fg(palette::SAFE)),
                Span::styled(" clipboard watch ", styles::text_muted()),
            ]);
            let pill_width = pill.width() as u16;
            if title_width + pill_width + 2 <= inner.width {
                buf.set_line(
                    inner.x + inner.width - pill_width,
                    inner.y,
                    &pill,
                    pill_width,
                );
            }
        }

        if self.view != View::Auth && inner.height >= 2 {
            let tabs_area = Rect {
                x: inner.x + 1,
                y: inner.y + 1,
                width: inner.width.saturating_sub(1),
                height: 1,
            };
            ViewTabs::new(self.view).render(tabs_area, buf);
        }
    }
}
