//! Test utilities for TUI rendering verification
//!
//! Helpers for testing widgets and full-screen rendering with ratatui's
//! TestBackend.
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.render_widget(AlertDialog::new(&alert), term.area());
//! assert!(term.buffer_contains("Connection Error"));
//! ```

use phishguard_app::navigation::View;
use phishguard_app::state::AppState;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Size of a typical terminal window
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Small split pane, for layouts that must degrade
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// In-memory terminal that widgets and whole frames are drawn into
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("TestBackend terminal");
        Self { terminal }
    }

    /// Whole drawable area
    pub fn area(&self) -> Rect {
        *self.buffer().area()
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.draw_with(|frame| frame.render_widget(widget, area));
    }

    /// Draw one frame, e.g. `|f| render::view(f, &state)`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("draw test frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Text of row `y`, one symbol per cell; empty past the last row
    pub fn row(&self, y: u16) -> String {
        let buffer = self.buffer();
        if y >= buffer.area.height {
            return String::new();
        }
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    pub fn rows(&self) -> Vec<String> {
        (0..self.buffer().area.height).map(|y| self.row(y)).collect()
    }

    /// Whether `text` appears within a single row
    pub fn buffer_contains(&self, text: &str) -> bool {
        self.rows().iter().any(|row| row.contains(text))
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        self.row(line).contains(text)
    }

    /// Every row joined by newlines, for assertion messages
    pub fn content(&self) -> String {
        let mut text = self.rows().join("\n");
        text.push('\n');
        text
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// AppState already signed in and showing `view`
pub fn state_on(view: View) -> AppState {
    let mut state = AppState::new();
    state.view = view;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_buffer_contains_and_line_contains() {
        let mut term = TestTerminal::compact();
        term.render_widget(Paragraph::new("hello\nworld"), term.area());
        assert!(term.buffer_contains("hello"));
        assert!(term.line_contains(1, "world"));
        assert!(!term.line_contains(0, "world"));
    }
}
