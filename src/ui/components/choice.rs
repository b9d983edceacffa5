//! Left/right cycling picker for a fixed list of options.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// A picker over `options`, where each option is `(value, label)`.
///
/// The picker may have no selection, showing `placeholder` until the user
/// moves it.
#[derive(Debug, Clone)]
pub struct ChoicePicker {
    options: Vec<(String, String)>,
    selected: Option<usize>,
    placeholder: String,
}

impl ChoicePicker {
    /// Create a picker with nothing selected.
    pub fn new(options: Vec<(String, String)>, placeholder: impl Into<String>) -> Self {
        Self {
            options,
            selected: None,
            placeholder: placeholder.into(),
        }
    }

    /// Select the option whose value is `value`; unknown values clear the
    /// selection.
    pub fn select_value(&mut self, value: &str) {
        self.selected = self.options.iter().position(|(v, _)| v == value);
    }

    /// Value of the selected option.
    pub fn value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|(v, _)| v.as_str())
    }

    fn label(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|(_, l)| l.as_str())
            .unwrap_or(&self.placeholder)
    }

    /// Handle keyboard input. Returns true if the selection changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let last = self.options.len() - 1;
        let next = match (key.code, self.selected) {
            (KeyCode::Left | KeyCode::Char('h'), None) => last,
            (KeyCode::Left | KeyCode::Char('h'), Some(i)) => i.checked_sub(1).unwrap_or(last),
            (KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' '), None) => 0,
            (KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' '), Some(i)) => {
                if i == last {
                    0
                } else {
                    i + 1
                }
            }
            _ => return false,
        };
        self.selected = Some(next);
        true
    }

    /// Render as `◀ label ▶` inside a labelled border.
    pub fn render_with_label(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        disabled: bool,
    ) {
        let value_style = if self.selected.is_none() || disabled {
            Style::default().fg(theme::MUTED)
        } else if focused {
            Style::default().fg(theme::FOCUS)
        } else {
            Style::default()
        };
        let arrow_style = if focused && !disabled {
            Style::default().fg(theme::FOCUS)
        } else {
            Style::default().fg(theme::MUTED)
        };

        let line = Line::from(vec![
            Span::styled("◀ ", arrow_style),
            Span::styled(self.label(), value_style),
            Span::styled(" ▶", arrow_style),
        ]);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", label),
                theme::label_style(focused).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(theme::border_style(focused));

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
