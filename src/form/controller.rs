//! Form state and submission lifecycle for the refund request form.
//!
//! The controller is the single owner of the draft and of the
//! idle → submitting → succeeded/failed lifecycle. Views read its state and
//! dispatch field edits, submit and reset to it; they hold no logic of their
//! own.

use tracing::{debug, info, instrument, warn};

use crate::api::{ApiError, RefundRequest, RefundResponse, Transport, REFUNDS_PATH};

use super::draft::{FieldError, FormDraft, FormField};
use super::mapper;

/// Shown when the request was accepted.
pub const SUCCESS_MESSAGE: &str = "Refund request submitted successfully";

/// Shown when a failure carries no server-provided message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit refund request. Please try again.";

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionLifecycle {
    /// Editing; nothing sent yet.
    #[default]
    Idle,
    /// A request is in flight.
    Submitting,
    /// The backend accepted the request.
    Succeeded,
    /// The last attempt failed; the draft is kept for a retry.
    Failed,
}

impl SubmissionLifecycle {
    /// Whether a new submission may start from this state.
    pub fn can_submit(&self) -> bool {
        matches!(self, SubmissionLifecycle::Idle | SubmissionLifecycle::Failed)
    }
}

/// Receives user-facing outcome messages.
///
/// Fire-and-forget: implementations must not fail.
pub trait Notifier {
    fn notify_success(&mut self, message: &str);
    fn notify_failure(&mut self, message: &str);
}

/// Result of the transport call, as handed back to the controller.
pub type SubmitOutcome = Result<RefundResponse, ApiError>;

/// Owns the refund form draft and drives its submission.
#[derive(Debug, Default)]
pub struct FormController {
    draft: FormDraft,
    lifecycle: SubmissionLifecycle,
    dialog_open: bool,
    last_error: Option<String>,
}

impl FormController {
    /// Create a controller with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current draft.
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// The current lifecycle state.
    pub fn lifecycle(&self) -> SubmissionLifecycle {
        self.lifecycle
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.lifecycle == SubmissionLifecycle::Submitting
    }

    /// Whether the result dialog should be visible.
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Message of the most recent failure, cleared by the next submit or reset.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Set one draft field. No validation, no submission.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.draft.set(field, value);
        debug!(field = %field, "Draft field updated");
    }

    /// Set a draft field addressed by its input name (e.g. `"bookingId"`).
    ///
    /// # Errors
    ///
    /// Returns `FieldError::UnknownField` if no field has that name.
    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FieldError> {
        let field: FormField = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Start a submission.
    ///
    /// Moves to `Submitting` and returns the payload to send, or `None` if a
    /// submission may not start now (already in flight, or already succeeded).
    pub fn begin_submit(&mut self) -> Option<RefundRequest> {
        if !self.lifecycle.can_submit() {
            debug!(lifecycle = ?self.lifecycle, "Ignoring submit");
            return None;
        }

        self.lifecycle = SubmissionLifecycle::Submitting;
        self.last_error = None;
        let payload = mapper::map(&self.draft);
        info!(
            booking = %payload.booking_reference,
            request_type = ?payload.request_type,
            reason = ?payload.reason,
            "Submitting refund request"
        );
        Some(payload)
    }

    /// Apply the transport outcome of a submission started with
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// Outcomes arriving when no submission is in flight (for example after a
    /// reset) are dropped.
    pub fn finish_submit(&mut self, outcome: SubmitOutcome, notifier: &mut dyn Notifier) {
        if !self.is_submitting() {
            warn!(lifecycle = ?self.lifecycle, "Dropping submission outcome, no request in flight");
            return;
        }

        match outcome {
            Ok(response) if response.success => {
                info!("Refund request accepted");
                self.lifecycle = SubmissionLifecycle::Succeeded;
                self.dialog_open = true;
                notifier.notify_success(SUCCESS_MESSAGE);
            }
            Ok(response) => {
                warn!(message = ?response.message, "Refund request declined");
                self.fail(response.message, notifier);
            }
            Err(err) => {
                warn!("Refund request failed: {}", err);
                let message = err.server_message().map(str::to_string);
                self.fail(message, notifier);
            }
        }
    }

    fn fail(&mut self, message: Option<String>, notifier: &mut dyn Notifier) {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        self.lifecycle = SubmissionLifecycle::Failed;
        notifier.notify_failure(&message);
        self.last_error = Some(message);
    }

    /// Map the draft, send it, and record the outcome.
    ///
    /// A no-op unless the lifecycle is `Idle` or `Failed`. Always leaves the
    /// lifecycle in `Succeeded` or `Failed` when it does run.
    #[instrument(skip_all)]
    pub async fn submit(&mut self, transport: &dyn Transport, notifier: &mut dyn Notifier) {
        let Some(payload) = self.begin_submit() else {
            return;
        };
        let outcome = transport.submit(REFUNDS_PATH, &payload).await;
        self.finish_submit(outcome, notifier);
    }

    /// Restore the default draft, return to `Idle` and close the dialog.
    pub fn reset(&mut self) {
        debug!(lifecycle = ?self.lifecycle, "Resetting form");
        self.draft = FormDraft::default();
        self.lifecycle = SubmissionLifecycle::Idle;
        self.dialog_open = false;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::api::{RefundReason, RefundRequestType};

    /// Transport returning canned outcomes and recording every call.
    #[derive(Default)]
    struct StubTransport {
        outcomes: Mutex<VecDeque<SubmitOutcome>>,
        calls: Mutex<Vec<(String, RefundRequest)>>,
    }

    impl StubTransport {
        fn returning(outcome: SubmitOutcome) -> Self {
            let stub = Self::default();
            stub.outcomes.lock().unwrap().push_back(outcome);
            stub
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn submit(
            &self,
            path: &str,
            payload: &RefundRequest,
        ) -> crate::api::error::Result<RefundResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), payload.clone()));
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(RefundResponse::accepted()))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        successes: Vec<String>,
        failures: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify_success(&mut self, message: &str) {
            self.successes.push(message.to_string());
        }

        fn notify_failure(&mut self, message: &str) {
            self.failures.push(message.to_string());
        }
    }

    fn filled_controller() -> FormController {
        let mut controller = FormController::new();
        controller.update_field(FormField::BookingId, "BK1");
        controller.update_field(FormField::RequestType, "modification");
        controller.update_field(FormField::Reason, "host_cancelled");
        controller.update_field(FormField::Name, "A");
        controller.update_field(FormField::ContactEmail, "a@b.com");
        controller
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = FormController::new();
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
        assert_eq!(controller.draft(), &FormDraft::default());
        assert!(!controller.is_dialog_open());
        assert_eq!(controller.last_error(), None);
    }

    #[test]
    fn test_update_field_does_not_submit() {
        let mut controller = FormController::new();
        controller.update_field(FormField::Name, "Ada");
        assert_eq!(controller.draft().name, "Ada");
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
    }

    #[test]
    fn test_update_field_by_name() {
        let mut controller = FormController::new();
        controller
            .update_field_by_name("additionalDetails", "Late checkout")
            .unwrap();
        assert_eq!(controller.draft().additional_details, "Late checkout");

        let err = controller.update_field_by_name("perks", "wifi").unwrap_err();
        assert_eq!(err, FieldError::UnknownField("perks".to_string()));
    }

    #[test]
    fn test_submit_success_opens_dialog() {
        let mut controller = filled_controller();
        let transport = StubTransport::returning(Ok(RefundResponse::accepted()));
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Succeeded);
        assert!(controller.is_dialog_open());
        assert_eq!(notifier.successes, vec![SUCCESS_MESSAGE.to_string()]);
        assert!(notifier.failures.is_empty());
    }

    #[test]
    fn test_submit_posts_mapped_payload_to_refunds() {
        let mut controller = filled_controller();
        let transport = StubTransport::default();
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        let calls = transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (path, payload) = &calls[0];
        assert_eq!(path, "/refunds");
        assert_eq!(payload.booking_reference, "BK1");
        assert_eq!(payload.request_type, RefundRequestType::PartialRefund);
        assert_eq!(payload.reason, RefundReason::HostIssue);
        assert_eq!(payload.email, "a@b.com");
    }

    #[test]
    fn test_rejection_without_body_uses_generic_message() {
        let mut controller = filled_controller();
        let transport = StubTransport::returning(Err(ApiError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
        )));
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Failed);
        assert_eq!(notifier.failures, vec![GENERIC_FAILURE_MESSAGE.to_string()]);
        assert_eq!(controller.last_error(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(!controller.is_dialog_open());
    }

    #[test]
    fn test_failure_surfaces_server_message() {
        let mut controller = filled_controller();
        let transport = StubTransport::returning(Err(ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("Booking BK1 is outside the refund window".to_string()),
        )));
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(
            notifier.failures,
            vec!["Booking BK1 is outside the refund window".to_string()]
        );
    }

    #[test]
    fn test_success_false_is_a_failure() {
        let mut controller = filled_controller();
        let transport = StubTransport::returning(Ok(RefundResponse::declined(Some(
            "Duplicate request".to_string(),
        ))));
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Failed);
        assert_eq!(notifier.failures, vec!["Duplicate request".to_string()]);
        assert!(notifier.successes.is_empty());
    }

    #[test]
    fn test_success_false_without_message_uses_generic_message() {
        let mut controller = filled_controller();
        let transport = StubTransport::returning(Ok(RefundResponse::declined(None)));
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(notifier.failures, vec![GENERIC_FAILURE_MESSAGE.to_string()]);
    }

    #[test]
    fn test_failure_preserves_draft() {
        let mut controller = filled_controller();
        controller.update_field(FormField::AdditionalDetails, "Roof leaking");
        let before = controller.draft().clone();
        let transport = StubTransport::returning(Err(ApiError::InvalidResponse(
            "truncated".to_string(),
        )));
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Failed);
        assert_eq!(controller.draft(), &before);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut controller = filled_controller();
        let transport = StubTransport::default();
        transport.outcomes.lock().unwrap().extend([
            Err(ApiError::from_status(StatusCode::BAD_GATEWAY, None)),
            Ok(RefundResponse::accepted()),
        ]);
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Failed);

        tokio_test::block_on(controller.submit(&transport, &mut notifier));
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Succeeded);
        assert_eq!(controller.last_error(), None);
        assert_eq!(transport.call_count(), 2);
    }

    #[test]
    fn test_submit_while_submitting_is_noop() {
        let mut controller = filled_controller();
        let transport = StubTransport::default();
        let mut notifier = RecordingNotifier::default();

        assert!(controller.begin_submit().is_some());
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Submitting);

        assert!(controller.begin_submit().is_none());
        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(transport.call_count(), 0);
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Submitting);
        assert!(notifier.successes.is_empty() && notifier.failures.is_empty());
    }

    #[test]
    fn test_submit_after_success_is_noop() {
        let mut controller = filled_controller();
        let transport = StubTransport::default();
        let mut notifier = RecordingNotifier::default();

        tokio_test::block_on(controller.submit(&transport, &mut notifier));
        tokio_test::block_on(controller.submit(&transport, &mut notifier));

        assert_eq!(transport.call_count(), 1);
        assert_eq!(notifier.successes.len(), 1);
    }

    #[test]
    fn test_begin_submit_sets_submitting_before_io() {
        let mut controller = filled_controller();
        let payload = controller.begin_submit().unwrap();
        assert!(controller.is_submitting());
        assert_eq!(payload, mapper::map(controller.draft()));
    }

    #[test]
    fn test_finish_submit_without_begin_is_ignored() {
        let mut controller = filled_controller();
        let mut notifier = RecordingNotifier::default();

        controller.finish_submit(Ok(RefundResponse::accepted()), &mut notifier);

        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
        assert!(notifier.successes.is_empty());
    }

    #[test]
    fn test_late_outcome_after_reset_is_dropped() {
        let mut controller = filled_controller();
        let mut notifier = RecordingNotifier::default();

        controller.begin_submit();
        controller.reset();
        controller.finish_submit(Ok(RefundResponse::accepted()), &mut notifier);

        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
        assert!(!controller.is_dialog_open());
        assert!(notifier.successes.is_empty());
    }

    #[test]
    fn test_reset_from_every_state() {
        let mut notifier = RecordingNotifier::default();

        // Idle
        let mut controller = filled_controller();
        controller.reset();
        assert_eq!(controller.draft(), &FormDraft::default());
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);

        // Submitting
        let mut controller = filled_controller();
        controller.begin_submit();
        controller.reset();
        assert_eq!(controller.draft(), &FormDraft::default());
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);

        // Succeeded
        let mut controller = filled_controller();
        controller.begin_submit();
        controller.finish_submit(Ok(RefundResponse::accepted()), &mut notifier);
        assert!(controller.is_dialog_open());
        controller.reset();
        assert_eq!(controller.draft(), &FormDraft::default());
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
        assert!(!controller.is_dialog_open());

        // Failed
        let mut controller = filled_controller();
        controller.begin_submit();
        controller.finish_submit(Err(ApiError::InvalidUrl("x".into())), &mut notifier);
        controller.reset();
        assert_eq!(controller.draft(), &FormDraft::default());
        assert_eq!(controller.lifecycle(), SubmissionLifecycle::Idle);
        assert_eq!(controller.last_error(), None);
    }

    #[test]
    fn test_can_submit() {
        assert!(SubmissionLifecycle::Idle.can_submit());
        assert!(SubmissionLifecycle::Failed.can_submit());
        assert!(!SubmissionLifecycle::Submitting.can_submit());
        assert!(!SubmissionLifecycle::Succeeded.can_submit());
    }
}
