//! Notification banner in the top-right corner

use phishguard_app::state::Banner;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use super::modal_overlay::fit_width;
use crate::theme::{icons::IconSet, palette, styles};

pub struct NotificationBanner<'a> {
    banner: &'a Banner,
    icons: IconSet,
}

impl<'a> NotificationBanner<'a> {
    pub fn new(banner: &'a Banner, icons: IconSet) -> Self {
        Self { banner, icons }
    }

    /// Where the banner lands inside `area`
    pub fn area(&self, area: Rect) -> Rect {
        let width = fit_width(
            [self.banner.title.as_str(), self.banner.body.as_str()],
            24,
            56,
        )
        .saturating_add(2)
        .min(area.width);
        let height = 4.min(area.height);
        Rect::new(area.x + area.width - width, area.y, width, height)
    }
}

impl Widget for NotificationBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = self.area(area);
        Clear.render(rect, buf);

        let danger = ratatui::style::Style::default().fg(palette::DANGER);
        let block = styles::glass_block(false).border_style(danger);
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled(self.icons.bell(), danger),
                Span::raw(" "),
                Span::styled(
                    self.banner.title.as_str(),
                    danger.add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(self.banner.body.as_str(), styles::text_primary()),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
