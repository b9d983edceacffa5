//! Colors and shared styles.

use ratatui::style::{Color, Modifier, Style};

/// Focused field accent.
pub const FOCUS: Color = Color::Yellow;
/// Placeholder and disabled text.
pub const MUTED: Color = Color::DarkGray;
/// Success accent.
pub const SUCCESS: Color = Color::Green;
/// Error accent.
pub const ERROR: Color = Color::Red;

/// Border style for a field.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Style for a field label.
pub fn label_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
