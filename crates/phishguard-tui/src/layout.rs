//! Screen layout definitions for the TUI
//!
//! Header on top, the active view in the middle and a one-row key hint bar
//! at the bottom. The header grows by a row when the tab strip is shown.

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title (and tab strip when signed in)
    pub header: Rect,

    /// Active view
    pub body: Rect,

    /// Key hints and loading indicator
    pub footer: Rect,
}

/// Create the main screen layout
///
/// # Arguments
/// * `area` - Total screen area
/// * `show_tabs` - Whether the header carries the view tabs
pub fn create(area: Rect, show_tabs: bool) -> ScreenAreas {
    // Top border + title row (+ tabs row) + bottom border
    let header_height = if show_tabs { 4 } else { 3 };

    let chunks = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_tabs() {
        let layout = create(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.body.y, 3);
        assert_eq!(layout.body.height, 20);
        assert_eq!(layout.footer.y, 23);
    }

    #[test]
    fn test_layout_with_tabs() {
        let layout = create(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.header.height, 4);
        assert_eq!(layout.body.height, 19);
    }

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 24);
        for show_tabs in [false, true] {
            let l = create(area, show_tabs);
            assert_eq!(l.header.height + l.body.height + l.footer.height, area.height);
        }
    }
}
