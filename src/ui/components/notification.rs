//! Toast notifications.
//!
//! Short-lived messages stacked in the bottom-right corner. The manager is
//! also the TUI's [`Notifier`], so submission outcomes land here.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::form::Notifier;
use crate::ui::theme;

/// Default time a toast stays visible.
const DEFAULT_DURATION: Duration = Duration::from_secs(4);

/// Toasts beyond this count push out the oldest.
const MAX_VISIBLE: usize = 3;

/// The kind of toast, which determines its look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
}

impl NotificationType {
    /// Icon shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Success => "✓",
            NotificationType::Error => "✗",
        }
    }

    /// Accent color.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Success => theme::SUCCESS,
            NotificationType::Error => theme::ERROR,
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    /// Create a toast that expires after `duration`.
    pub fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Whether the toast has outlived its duration.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Queue of visible toasts.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a manager using the default toast duration.
    pub fn new() -> Self {
        Self::with_duration(DEFAULT_DURATION)
    }

    /// Create a manager whose toasts last `duration`.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            notifications: VecDeque::new(),
            duration,
        }
    }

    /// Add a toast, dropping the oldest beyond the visible limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > MAX_VISIBLE {
            self.notifications.pop_front();
        }
    }

    fn push_typed(&mut self, message: impl Into<String>, notification_type: NotificationType) {
        self.push(Notification::new(message, notification_type, self.duration));
    }

    /// Add a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push_typed(message, NotificationType::Success);
    }

    /// Add an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push_typed(message, NotificationType::Error);
    }

    /// Drop expired toasts. Call once per tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render the toasts stacked in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = 50.min(area.width.saturating_sub(4));
        // Borders plus icon and space.
        let inner_width = width.saturating_sub(4).max(1) as usize;

        let heights: Vec<u16> = self
            .notifications
            .iter()
            .map(|n| {
                let text_len = n.message.chars().count() + 2;
                text_len.div_ceil(inner_width) as u16 + 2
            })
            .collect();

        let total_height = heights
            .iter()
            .sum::<u16>()
            .min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(heights.iter().map(|&h| Constraint::Length(h)))
            .split(Rect::new(x, y, width, total_height));

        for (notification, chunk) in self.notifications.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

impl Notifier for NotificationManager {
    fn notify_success(&mut self, message: &str) {
        self.success(message);
    }

    fn notify_failure(&mut self, message: &str) {
        self.error(message);
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.notification_type.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.notification_type.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
