//! The refund request form: draft, request mapping and submission lifecycle.
//!
//! Nothing in here renders anything; views drive a [`FormController`] and read
//! its state back.

mod controller;
mod draft;
pub mod mapper;

pub use controller::{
    FormController, Notifier, SubmissionLifecycle, SubmitOutcome, GENERIC_FAILURE_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use draft::{DraftReason, DraftRequestType, FieldError, FormDraft, FormField};
