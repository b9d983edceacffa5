//! Translation from form drafts to refund API requests.
//!
//! The form's vocabulary and the backend's are kept apart on purpose; unknown
//! or unset values fall back to a default instead of failing the request.

use crate::api::types::{RefundReason, RefundRequest, RefundRequestType};

use super::draft::{DraftReason, DraftRequestType, FormDraft};

/// Build the `POST /refunds` body for a draft.
pub fn map(draft: &FormDraft) -> RefundRequest {
    RefundRequest {
        booking_reference: draft.booking_id.clone(),
        request_type: map_request_type(&draft.request_type),
        reason: map_reason(&draft.reason),
        name: draft.name.clone(),
        email: draft.contact_email.clone(),
        description: draft.additional_details.clone(),
    }
}

/// Request type table. Unrecognized values become `Refund`.
pub fn map_request_type(request_type: &DraftRequestType) -> RefundRequestType {
    match request_type {
        DraftRequestType::Cancellation => RefundRequestType::Cancellation,
        DraftRequestType::Refund => RefundRequestType::Refund,
        DraftRequestType::Modification => RefundRequestType::PartialRefund,
        DraftRequestType::Unrecognized(_) => RefundRequestType::Refund,
    }
}

/// Reason table. Unset and unrecognized values become `Other`.
pub fn map_reason(reason: &DraftReason) -> RefundReason {
    match reason {
        DraftReason::Emergency => RefundReason::Emergency,
        DraftReason::PropertyIssue => RefundReason::PropertyIssue,
        DraftReason::HostCancelled => RefundReason::HostIssue,
        DraftReason::TravelRestrictions => RefundReason::ChangeOfPlans,
        DraftReason::Other => RefundReason::Other,
        DraftReason::Unset | DraftReason::Unrecognized(_) => RefundReason::Other,
    }
}
