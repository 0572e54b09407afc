//! View tabs shown under the title once signed in

use phishguard_app::navigation::View;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

use crate::theme::styles;

/// Tab strip for the signed-in views with their F-key shortcuts
pub struct ViewTabs {
    active: View,
}

impl ViewTabs {
    pub fn new(active: View) -> Self {
        Self { active }
    }

    fn titles() -> Vec<Line<'static>> {
        View::TABS
            .iter()
            .enumerate()
            .map(|(i, view)| {
                Line::from(vec![
                    Span::styled(format!("F{} ", i + 1), styles::keybinding()),
                    Span::raw(view.title()),
                ])
            })
            .collect()
    }
}

impl Widget for ViewTabs {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let selected = View::TABS
            .iter()
            .position(|v| *v == self.active)
            .unwrap_or(0);
        Tabs::new(Self::titles())
            .select(selected)
            .style(styles::text_secondary())
            .highlight_style(styles::focused_selected())
            .divider(Span::styled("│", styles::text_muted()))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_tabs_list_every_view() {
        let mut term = TestTerminal::with_size(100, 1);
        term.render_widget(ViewTabs::new(View::History), term.area());
        for view in View::TABS {
            assert!(term.buffer_contains(view.title()), "missing {:?}", view);
        }
        assert!(term.buffer_contains("F4 Scan History"));
    }
}
