//! Shared modal overlay utilities.
//!
//! Centering, background dimming, shadows and the button row shared by the
//! alert, confirmation and result dialogs.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::theme::{palette, styles};

/// Center a fixed-size rect within an area.
///
/// If the requested size exceeds the area, clamps to the area dimensions.
///
/// # Examples
/// ```
/// use ratatui::layout::Rect;
/// use phishguard_tui::widgets::modal_overlay::centered_rect;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let modal = centered_rect(40, 10, area);
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim all cells in the given area so the modal on top stands out.
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default().fg(palette::TEXT_MUTED);

    let y_end = area.y.saturating_add(area.height);
    let x_end = area.x.saturating_add(area.width);
    for y in area.y..y_end {
        for x in area.x..x_end {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow offset to the right and bottom of a modal rect.
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal_rect.x.saturating_add(modal_rect.width);
    let bottom_y = modal_rect.y.saturating_add(modal_rect.height);

    for y in modal_rect.y.saturating_add(1)..=bottom_y {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_symbol(" ").set_style(shadow_style);
        }
    }
    for x in modal_rect.x.saturating_add(1)..=right_x {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_symbol(" ").set_style(shadow_style);
        }
    }
}

/// Row of `[ Label ]` buttons with the selected one highlighted
pub fn button_row<'a>(labels: impl IntoIterator<Item = &'a str>, selected: usize) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, label) in labels.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if i == selected {
            styles::focused_selected()
        } else {
            styles::text_secondary()
        };
        spans.push(Span::styled(format!("[ {} ]", label), style));
    }
    Line::from(spans)
}

/// Modal width fitting the longest line, within `min..=max`
pub fn fit_width<'a>(lines: impl IntoIterator<Item = &'a str>, min: u16, max: u16) -> u16 {
    let widest = lines.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0);
    // Borders plus one column of padding each side
    let wanted = u16::try_from(widest).unwrap_or(u16::MAX).saturating_add(4);
    wanted.clamp(min, max)
}

/// Number of rows `text` occupies when wrapped at `width` columns
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| UnicodeWidthStr::width(line).div_ceil(width).max(1))
        .sum();
    u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(50, 20, area), area);
    }

    #[test]
    fn test_dim_background_keeps_symbols() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        buf.set_string(0, 0, "ab", Style::default());
        dim_background(&mut buf, area);
        assert_eq!(buf[(0, 0)].symbol(), "a");
        assert_eq!(buf[(0, 0)].fg, palette::TEXT_MUTED);
    }

    #[test]
    fn test_shadow_stays_inside_buffer() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        render_shadow(&mut buf, Rect::new(2, 1, 6, 3));
        assert_eq!(buf[(8, 2)].bg, palette::SHADOW);
        assert_eq!(buf[(5, 4)].bg, palette::SHADOW);
        assert_ne!(buf[(2, 4)].bg, palette::SHADOW);
    }

    #[test]
    fn test_button_row_highlights_selection() {
        let line = button_row(["Cancel", "Delete"], 1);
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[2].content, "[ Delete ]");
        assert_eq!(line.spans[2].style, styles::focused_selected());
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width(["abc"], 20, 60), 20);
        assert_eq!(fit_width(["x".repeat(30).as_str()], 20, 60), 34);
        assert_eq!(fit_width(["x".repeat(90).as_str()], 20, 60), 60);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("abcdefghij", 10), 1);
        assert_eq!(wrapped_height("abcdefghijk", 10), 2);
        assert_eq!(wrapped_height("a\n\nb", 10), 3);
    }
}
