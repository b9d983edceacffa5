//! Result dialog shown after a refund request is accepted.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme;

/// Modal confirming a submitted request.
///
/// Presentation only: visibility comes from the form controller, and closing
/// is reported back to the caller, which resets the controller.
#[derive(Debug, Clone)]
pub struct ResultDialog {
    title: String,
    body: String,
}

impl Default for ResultDialog {
    fn default() -> Self {
        Self::new(
            "Request Submitted",
            "Your request has been received. We will review it and email you \
             within 2 business days.",
        )
    }
}

impl ResultDialog {
    /// Create a dialog with the given title and body text.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Returns true when the key closes the dialog.
    pub fn handle_input(&self, key: KeyEvent) -> bool {
        matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
        )
    }

    /// Render the dialog centered in `area` when `open` is set.
    pub fn render(&self, frame: &mut Frame, area: Rect, open: bool) {
        if !open {
            return;
        }

        let dialog_area = centered_rect(60, 9, area);
        frame.render_widget(Clear, dialog_area);

        let accent = Style::default().fg(theme::SUCCESS);
        let block = Block::default()
            .title(Span::styled(
                format!(" ✓ {} ", self.title),
                accent.add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(accent);

        let text = vec![
            Line::from(""),
            Line::from(self.body.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to submit another request",
                Style::default().fg(theme::MUTED),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, dialog_area);
    }
}

/// A rectangle `width_percent` wide and `height` rows tall, centered in `area`.
fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
