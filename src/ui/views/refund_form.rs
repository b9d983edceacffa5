//! The refund request form view.
//!
//! Holds only widget state (cursor positions, focus). Every edit is
//! dispatched to the [`FormController`] straight away; the controller's draft
//! is the source of truth.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::{DraftReason, DraftRequestType, FormController, FormDraft, FormField};
use crate::ui::components::{ChoicePicker, TextInput};
use crate::ui::theme;

/// Actions returned from the form view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundFormAction {
    /// Submit the draft.
    Submit,
    /// Submit was pressed with required fields empty.
    MissingFields(Vec<FormField>),
    /// Leave the application.
    Quit,
}

/// What has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FormField),
    SubmitButton,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Field(FormField::BookingId),
        Focus::Field(FormField::RequestType),
        Focus::Field(FormField::Reason),
        Focus::Field(FormField::Name),
        Focus::Field(FormField::ContactEmail),
        Focus::Field(FormField::AdditionalDetails),
        Focus::SubmitButton,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// The refund request form.
pub struct RefundFormView {
    booking_id: TextInput,
    request_type: ChoicePicker,
    reason: ChoicePicker,
    name: TextInput,
    contact_email: TextInput,
    additional_details: TextInput,
    focus: Focus,
}

impl Default for RefundFormView {
    fn default() -> Self {
        Self::new()
    }
}

impl RefundFormView {
    /// Create the view showing an empty draft.
    pub fn new() -> Self {
        let request_types = DraftRequestType::CHOICES
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect();
        let reasons = DraftReason::CHOICES
            .iter()
            .map(|r| (r.as_str().to_string(), r.label().to_string()))
            .collect();

        let mut view = Self {
            booking_id: TextInput::with_placeholder("e.g. BK-20391"),
            request_type: ChoicePicker::new(request_types, "Select a request type"),
            reason: ChoicePicker::new(reasons, DraftReason::Unset.label()),
            name: TextInput::with_placeholder("As shown on the booking"),
            contact_email: TextInput::with_placeholder("you@example.com"),
            additional_details: TextInput::with_placeholder("Optional"),
            focus: Focus::Field(FormField::BookingId),
        };
        view.sync_from(&FormDraft::default());
        view
    }

    /// Current focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Load widget contents from a draft, e.g. after the controller reset.
    pub fn sync_from(&mut self, draft: &FormDraft) {
        self.booking_id.set_value(draft.booking_id.as_str());
        self.request_type.select_value(draft.request_type.as_str());
        self.reason.select_value(draft.reason.as_str());
        self.name.set_value(draft.name.as_str());
        self.contact_email.set_value(draft.contact_email.as_str());
        self.additional_details
            .set_value(draft.additional_details.as_str());
    }

    /// Return focus to the first field.
    pub fn focus_first(&mut self) {
        self.focus = Focus::Field(FormField::BookingId);
    }

    /// Handle keyboard input, dispatching edits to the controller.
    pub fn handle_input(
        &mut self,
        controller: &mut FormController,
        key: KeyEvent,
    ) -> Option<RefundFormAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                return Some(RefundFormAction::Quit)
            }
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.focus = self.focus.next();
                return None;
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::Up, _) => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }

        // Inputs are read-only while a request is in flight.
        if controller.is_submitting() {
            return None;
        }

        match (self.focus, key.code) {
            (Focus::SubmitButton, KeyCode::Enter) | (_, KeyCode::F(2)) => {
                let missing = controller.draft().missing_required_fields();
                if missing.is_empty() {
                    Some(RefundFormAction::Submit)
                } else {
                    Some(RefundFormAction::MissingFields(missing))
                }
            }
            (Focus::Field(_), KeyCode::Enter) => {
                self.focus = self.focus.next();
                None
            }
            (Focus::Field(field), _) => {
                self.edit_field(controller, field, key);
                None
            }
            (Focus::SubmitButton, _) => None,
        }
    }

    fn edit_field(&mut self, controller: &mut FormController, field: FormField, key: KeyEvent) {
        let new_value = match field {
            FormField::RequestType => self
                .request_type
                .handle_input(key)
                .then(|| self.request_type.value().unwrap_or_default().to_string()),
            FormField::Reason => self
                .reason
                .handle_input(key)
                .then(|| self.reason.value().unwrap_or_default().to_string()),
            _ => {
                let input = self.text_input_mut(field);
                input
                    .handle_input(key)
                    .then(|| input.value().to_string())
            }
        };

        if let Some(value) = new_value {
            controller.update_field(field, value);
        }
    }

    fn text_input_mut(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::BookingId => &mut self.booking_id,
            FormField::Name => &mut self.name,
            FormField::ContactEmail => &mut self.contact_email,
            _ => &mut self.additional_details,
        }
    }

    /// Render the form.
    pub fn render(&self, frame: &mut Frame, area: Rect, controller: &FormController) {
        let outer = Block::default()
            .title(Span::styled(
                " Request a Refund or Cancellation ",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let disabled = controller.is_submitting();
        let focused = |field: FormField| self.focus == Focus::Field(field);
        let label = |field: FormField| {
            if field.is_required() {
                format!("{} *", field.label())
            } else {
                field.label().to_string()
            }
        };

        self.booking_id.render_with_label(
            frame,
            rows[0],
            &label(FormField::BookingId),
            focused(FormField::BookingId),
            disabled,
        );
        self.request_type.render_with_label(
            frame,
            rows[1],
            &label(FormField::RequestType),
            focused(FormField::RequestType),
            disabled,
        );
        self.reason.render_with_label(
            frame,
            rows[2],
            &label(FormField::Reason),
            focused(FormField::Reason),
            disabled,
        );
        self.name.render_with_label(
            frame,
            rows[3],
            &label(FormField::Name),
            focused(FormField::Name),
            disabled,
        );
        self.contact_email.render_with_label(
            frame,
            rows[4],
            &label(FormField::ContactEmail),
            focused(FormField::ContactEmail),
            disabled,
        );
        self.additional_details.render_with_label(
            frame,
            rows[5],
            &label(FormField::AdditionalDetails),
            focused(FormField::AdditionalDetails),
            disabled,
        );

        self.render_submit_button(frame, rows[7], controller);

        if let Some(error) = controller.last_error() {
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(theme::ERROR)))
                    .alignment(Alignment::Center),
                rows[8],
            );
        }

        let help = Paragraph::new(Line::from(Span::styled(
            "Tab/↑↓ move  ←/→ choose  Enter/F2 submit  Esc quit",
            Style::default().fg(theme::MUTED),
        )))
        .alignment(Alignment::Center);
        if let Some(last) = rows.last() {
            frame.render_widget(help, *last);
        }
    }

    fn render_submit_button(&self, frame: &mut Frame, area: Rect, controller: &FormController) {
        let (text, style) = if controller.is_submitting() {
            ("[ Submitting... ]", Style::default().fg(theme::MUTED))
        } else if self.focus == Focus::SubmitButton {
            (
                "[ Submit Request ]",
                Style::default()
                    .fg(theme::FOCUS)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
        } else {
            ("[ Submit Request ]", Style::default())
        };

        frame.render_widget(
            Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SubmissionLifecycle;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut RefundFormView, controller: &mut FormController, text: &str) {
        for c in text.chars() {
            view.handle_input(controller, key(KeyCode::Char(c)));
        }
    }

    fn fill_required(view: &mut RefundFormView, controller: &mut FormController) {
        type_text(view, controller, "BK1");
        view.handle_input(controller, key(KeyCode::Tab)); // request type
        view.handle_input(controller, key(KeyCode::Tab)); // reason
        view.handle_input(controller, key(KeyCode::Right));
        view.handle_input(controller, key(KeyCode::Tab)); // name
        type_text(view, controller, "A");
        view.handle_input(controller, key(KeyCode::Tab)); // email
        type_text(view, controller, "a@b.com");
    }

    #[test]
    fn test_typing_updates_controller_draft() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();

        type_text(&mut view, &mut controller, "BK-9");
        assert_eq!(controller.draft().booking_id, "BK-9");
    }

    #[test]
    fn test_picker_updates_enum_fields() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();

        view.handle_input(&mut controller, key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Field(FormField::RequestType));
        view.handle_input(&mut controller, key(KeyCode::Right));
        assert_eq!(controller.draft().request_type, DraftRequestType::Refund);

        view.handle_input(&mut controller, key(KeyCode::Tab));
        view.handle_input(&mut controller, key(KeyCode::Left));
        assert_eq!(controller.draft().reason, DraftReason::Other);
    }

    #[test]
    fn test_focus_wraps() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();

        view.handle_input(&mut controller, key(KeyCode::BackTab));
        assert_eq!(view.focus(), Focus::SubmitButton);
        view.handle_input(&mut controller, key(KeyCode::Tab));
        assert_eq!(view.focus(), Focus::Field(FormField::BookingId));
    }

    #[test]
    fn test_submit_with_missing_fields() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();

        let action = view.handle_input(&mut controller, key(KeyCode::F(2)));
        match action {
            Some(RefundFormAction::MissingFields(fields)) => {
                assert!(fields.contains(&FormField::BookingId));
                assert!(fields.contains(&FormField::Reason));
            }
            other => panic!("Expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_when_complete() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();
        fill_required(&mut view, &mut controller);

        let action = view.handle_input(&mut controller, key(KeyCode::F(2)));
        assert_eq!(action, Some(RefundFormAction::Submit));
        // The view only asks; the lifecycle is untouched until the app submits.
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
    }

    #[test]
    fn test_inputs_locked_while_submitting() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();
        fill_required(&mut view, &mut controller);
        controller.begin_submit();

        view.handle_input(&mut controller, key(KeyCode::Char('x')));
        assert_eq!(controller.draft().contact_email, "a@b.com");
        assert_eq!(view.handle_input(&mut controller, key(KeyCode::F(2))), None);
    }

    #[test]
    fn test_sync_from_default_after_reset() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();
        fill_required(&mut view, &mut controller);

        controller.reset();
        view.sync_from(controller.draft());

        assert_eq!(view.booking_id.value(), "");
        assert_eq!(view.reason.value(), None);
        assert_eq!(view.request_type.value(), Some("cancellation"));
    }

    #[test]
    fn test_escape_quits() {
        let mut view = RefundFormView::new();
        let mut controller = FormController::new();
        assert_eq!(
            view.handle_input(&mut controller, key(KeyCode::Esc)),
            Some(RefundFormAction::Quit)
        );
    }
}
