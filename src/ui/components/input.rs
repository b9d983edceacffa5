//! Single-line text input.
//!
//! The cursor counts characters, not bytes, so non-ASCII names and addresses
//! edit correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty input with placeholder text.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_len();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of a character index.
    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Delete, _) if self.cursor < self.char_len() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
                false
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) if !self.value.is_empty() => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// The part of the value that fits in `width` columns, scrolled so the
    /// cursor stays visible, and the cursor's column within it.
    fn viewport(&self, width: usize) -> (String, u16) {
        let offset = (self.cursor + 1).saturating_sub(width.max(1));
        let visible = self.value.chars().skip(offset).take(width).collect();
        let column = u16::try_from(self.cursor - offset).unwrap_or(u16::MAX);
        (visible, column)
    }

    /// Render the input with a label in its border.
    pub fn render_with_label(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        disabled: bool,
    ) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let (display, cursor_column) = if showing_placeholder {
            (self.placeholder.clone(), 0)
        } else {
            self.viewport(usize::from(area.width.saturating_sub(2)))
        };

        let text_style = if showing_placeholder || disabled {
            Style::default().fg(theme::MUTED)
        } else if focused {
            Style::default().fg(theme::FOCUS)
        } else {
            Style::default()
        };

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", label),
                theme::label_style(focused).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused));

        frame.render_widget(Paragraph::new(display).style(text_style).block(block), area);

        if focused && !disabled {
            let cursor_x = area.x.saturating_add(1).saturating_add(cursor_column);
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}
