//! Single-line text field with a byte-offset cursor

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::tui::themes::Theme;
use crate::tui::utils::{display_width, tail_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Continue,
    Submit,
    ContentChanged,
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    content: String,
    /// Byte offset, always on a char boundary
    cursor_position: usize,
    placeholder: &'static str,
}

impl TextField {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            content: String::new(),
            cursor_position: 0,
            placeholder,
        }
    }

    pub fn with_content(placeholder: &'static str, content: impl Into<String>) -> Self {
        let mut field = Self::new(placeholder);
        field.set(content);
        field
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content and move the cursor to the end
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor_position = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match code {
            KeyCode::Enter => InputAction::Submit,
            // Ctrl+U - clear line
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                InputAction::ContentChanged
            }
            // Ctrl+W - delete word backwards
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                if self.delete_word_backwards() {
                    InputAction::ContentChanged
                } else {
                    InputAction::Continue
                }
            }
            KeyCode::Char('a') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor_position = 0;
                InputAction::Continue
            }
            KeyCode::Char('e') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor_position = self.content.len();
                InputAction::Continue
            }
            KeyCode::Char(_)
                if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                InputAction::Continue
            }
            KeyCode::Char(ch) => {
                self.content.insert(self.cursor_position, ch);
                self.cursor_position += ch.len_utf8();
                InputAction::ContentChanged
            }
            KeyCode::Backspace => {
                if self.cursor_position == 0 {
                    return InputAction::Continue;
                }
                let start = self.prev_boundary();
                self.content.drain(start..self.cursor_position);
                self.cursor_position = start;
                InputAction::ContentChanged
            }
            KeyCode::Delete => {
                if self.cursor_position >= self.content.len() {
                    return InputAction::Continue;
                }
                let end = self.next_boundary();
                self.content.drain(self.cursor_position..end);
                InputAction::ContentChanged
            }
            KeyCode::Left => {
                self.cursor_position = self.prev_boundary();
                InputAction::Continue
            }
            KeyCode::Right => {
                self.cursor_position = self.next_boundary();
                InputAction::Continue
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                InputAction::Continue
            }
            KeyCode::End => {
                self.cursor_position = self.content.len();
                InputAction::Continue
            }
            _ => InputAction::Continue,
        }
    }

    /// Insert pasted text, flattening newlines
    pub fn insert_text(&mut self, text: &str) {
        let flat: String = text.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
        self.content.insert_str(self.cursor_position, &flat);
        self.cursor_position += flat.len();
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor_position]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor_position..]
            .chars()
            .next()
            .map(|c| self.cursor_position + c.len_utf8())
            .unwrap_or(self.content.len())
    }

    fn delete_word_backwards(&mut self) -> bool {
        let before = &self.content[..self.cursor_position];
        let trimmed = before.trim_end();
        let new_pos = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(idx, c)| idx + c.len_utf8())
            .unwrap_or(0);
        if new_pos == self.cursor_position {
            return false;
        }
        self.content.drain(new_pos..self.cursor_position);
        self.cursor_position = new_pos;
        true
    }

    /// Spans for one row of `width` cells. When focused the char under the
    /// cursor is reversed and the view scrolls to keep it visible.
    pub fn spans(&self, width: usize, focused: bool, theme: &Theme) -> Vec<Span<'static>> {
        let base = Style::default().fg(theme.text_color).bg(theme.input_bg_color);
        if self.content.is_empty() && !focused {
            return vec![Span::styled(
                format!("{:<width$}", self.placeholder),
                Style::default()
                    .fg(theme.input_placeholder_color)
                    .bg(theme.input_bg_color),
            )];
        }
        if !focused {
            let shown = tail_to_width(&self.content, width);
            let fill = width.saturating_sub(display_width(shown));
            return vec![Span::styled(format!("{}{}", shown, " ".repeat(fill)), base)];
        }

        let before = tail_to_width(&self.content[..self.cursor_position], width.saturating_sub(1));
        let rest = &self.content[self.cursor_position..];
        let mut chars = rest.chars();
        let at_cursor = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = chars.collect();

        let used = display_width(before) + display_width(&at_cursor);
        let after = crate::tui::utils::truncate_ellipsis(&after, width.saturating_sub(used))
            .into_owned();
        let fill = width.saturating_sub(used + display_width(&after));

        vec![
            Span::styled(before.to_string(), base),
            Span::styled(at_cursor, base.add_modifier(Modifier::REVERSED)),
            Span::styled(format!("{}{}", after, " ".repeat(fill)), base),
        ]
    }
}
