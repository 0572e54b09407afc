//! Labelled text input box

use phishguard_app::text_field::TextField;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::styles;

/// Bordered input showing a `TextField` with its cursor
pub struct TextInput<'a> {
    label: &'a str,
    field: &'a TextField,
    focused: bool,
    mask: Option<char>,
    placeholder: &'a str,
    multiline: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, field: &'a TextField) -> Self {
        Self {
            label,
            field,
            focused: false,
            mask: None,
            placeholder: "",
            multiline: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Render every character as `mask` (passwords)
    pub fn masked(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Wrap long text over the available rows instead of scrolling sideways
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    fn display_chars(&self) -> Vec<char> {
        match self.mask {
            Some(mask) => self.field.masked(mask).chars().collect(),
            None => self.field.value().chars().collect(),
        }
    }

    /// Text split around the cursor, windowed so the cursor stays visible
    fn cursor_line(&self, width: usize) -> Line<'static> {
        let chars = self.display_chars();
        let cursor = self.field.cursor().min(chars.len());

        let start = if self.multiline {
            0
        } else {
            // Keep one column for the cursor cell
            cursor.saturating_sub(width.saturating_sub(1))
        };

        let before: String = chars[start..cursor].iter().collect();
        let at: String = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
        let after: String = chars.iter().skip(cursor + 1).collect();

        let text = styles::text_primary();
        Line::from(vec![
            Span::styled(before, text),
            Span::styled(at, text.add_modifier(Modifier::REVERSED)),
            Span::styled(after, text),
        ])
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(Span::styled(
            format!(" {} ", self.label),
            if self.focused {
                styles::accent_bold()
            } else {
                styles::text_secondary()
            },
        ));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let line = if self.field.is_empty() && !self.focused {
            Line::from(Span::styled(self.placeholder, styles::text_muted()))
        } else if self.focused {
            self.cursor_line(usize::from(inner.width))
        } else {
            Line::from(Span::styled(
                self.display_chars().into_iter().collect::<String>(),
                Style::default(),
            ))
        };

        let mut paragraph = Paragraph::new(line);
        if self.multiline {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        paragraph.render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_label_and_value() {
        let field = TextField::new("example.com");
        let mut term = TestTerminal::with_size(40, 3);
        term.render_widget(TextInput::new("Website URL", &field), term.area());
        assert!(term.line_contains(0, "Website URL"));
        assert!(term.line_contains(1, "example.com"));
    }

    #[test]
    fn test_placeholder_when_empty_and_unfocused() {
        let field = TextField::default();
        let mut term = TestTerminal::with_size(40, 3);
        term.render_widget(
            TextInput::new("Email", &field).placeholder("you@gmail.com"),
            term.area(),
        );
        assert!(term.buffer_contains("you@gmail.com"));
    }

    #[test]
    fn test_password_is_masked() {
        let field = TextField::new("hunter2!");
        let mut term = TestTerminal::with_size(40, 3);
        term.render_widget(
            TextInput::new("Password", &field).masked('•').focused(true),
            term.area(),
        );
        assert!(!term.buffer_contains("hunter2"));
        assert!(term.buffer_contains("••••••••"));
    }

    #[test]
    fn test_long_value_scrolls_to_cursor() {
        let field = TextField::new("https://very-long-host.example/path/to/the/end");
        let mut term = TestTerminal::with_size(20, 3);
        term.render_widget(TextInput::new("URL", &field).focused(true), term.area());
        assert!(term.buffer_contains("/the/end"));
        assert!(!term.buffer_contains("https://"));
    }

    #[test]
    fn test_cursor_cell_is_reversed() {
        let field = TextField::new("ab");
        let mut term = TestTerminal::with_size(20, 3);
        term.render_widget(TextInput::new("X", &field).focused(true), term.area());
        // Cursor sits after "ab"
        let cell = &term.buffer()[(3, 1)];
        assert!(cell.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_multiline_wraps() {
        let field = TextField::new("Your parcel is held, pay at parcel-help.example now");
        let mut term = TestTerminal::with_size(24, 6);
        term.render_widget(TextInput::new("Message", &field).multiline(), term.area());
        assert!(term.buffer_contains("Your parcel is held"));
        assert!(term.buffer_contains("now"));
    }
}
