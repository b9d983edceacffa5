//! The editable draft behind the refund request form.
//!
//! Enum-valued fields keep whatever string the input surface hands in: known
//! values become their variant, anything else is kept as `Unrecognized` so the
//! request mapper can fall back instead of the whole submission failing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Kind of request the guest is making, as offered by the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftRequestType {
    /// Cancel the booking outright.
    #[default]
    Cancellation,
    /// Ask for the booking amount back.
    Refund,
    /// Change the booking, usually for a partial refund.
    Modification,
    /// A value the form does not know about.
    Unrecognized(String),
}

impl DraftRequestType {
    /// Options shown in the picker, in display order.
    pub const CHOICES: [DraftRequestType; 3] = [
        DraftRequestType::Cancellation,
        DraftRequestType::Refund,
        DraftRequestType::Modification,
    ];

    /// The value used by the input surface.
    pub fn as_str(&self) -> &str {
        match self {
            DraftRequestType::Cancellation => "cancellation",
            DraftRequestType::Refund => "refund",
            DraftRequestType::Modification => "modification",
            DraftRequestType::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            DraftRequestType::Cancellation => "Cancellation",
            DraftRequestType::Refund => "Refund",
            DraftRequestType::Modification => "Booking modification",
            DraftRequestType::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for DraftRequestType {
    fn from(value: &str) -> Self {
        match value {
            "cancellation" => DraftRequestType::Cancellation,
            "refund" => DraftRequestType::Refund,
            "modification" => DraftRequestType::Modification,
            other => DraftRequestType::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for DraftRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason the guest gives for the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftReason {
    /// Nothing selected yet.
    #[default]
    Unset,
    Emergency,
    PropertyIssue,
    HostCancelled,
    TravelRestrictions,
    Other,
    /// A value the form does not know about.
    Unrecognized(String),
}

impl DraftReason {
    /// Options shown in the picker, in display order.
    pub const CHOICES: [DraftReason; 5] = [
        DraftReason::Emergency,
        DraftReason::PropertyIssue,
        DraftReason::HostCancelled,
        DraftReason::TravelRestrictions,
        DraftReason::Other,
    ];

    /// The value used by the input surface.
    pub fn as_str(&self) -> &str {
        match self {
            DraftReason::Unset => "",
            DraftReason::Emergency => "emergency",
            DraftReason::PropertyIssue => "property_issue",
            DraftReason::HostCancelled => "host_cancelled",
            DraftReason::TravelRestrictions => "travel_restrictions",
            DraftReason::Other => "other",
            DraftReason::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            DraftReason::Unset => "Select a reason",
            DraftReason::Emergency => "Personal emergency",
            DraftReason::PropertyIssue => "Issue with the property",
            DraftReason::HostCancelled => "Host cancelled",
            DraftReason::TravelRestrictions => "Travel restrictions",
            DraftReason::Other => "Other",
            DraftReason::Unrecognized(raw) => raw,
        }
    }

    /// Whether a reason has been picked.
    pub fn is_set(&self) -> bool {
        !matches!(self, DraftReason::Unset)
    }
}

impl From<&str> for DraftReason {
    fn from(value: &str) -> Self {
        match value {
            "" => DraftReason::Unset,
            "emergency" => DraftReason::Emergency,
            "property_issue" => DraftReason::PropertyIssue,
            "host_cancelled" => DraftReason::HostCancelled,
            "travel_restrictions" => DraftReason::TravelRestrictions,
            "other" => DraftReason::Other,
            other => DraftReason::Unrecognized(other.to_string()),
        }
    }
}

impl fmt::Display for DraftReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields of the refund form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    BookingId,
    RequestType,
    Reason,
    Name,
    ContactEmail,
    AdditionalDetails,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [FormField; 6] = [
        FormField::BookingId,
        FormField::RequestType,
        FormField::Reason,
        FormField::Name,
        FormField::ContactEmail,
        FormField::AdditionalDetails,
    ];

    /// The field name used by the input surface.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::BookingId => "bookingId",
            FormField::RequestType => "requestType",
            FormField::Reason => "reason",
            FormField::Name => "name",
            FormField::ContactEmail => "contactEmail",
            FormField::AdditionalDetails => "additionalDetails",
        }
    }

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::BookingId => "Booking ID",
            FormField::RequestType => "Request Type",
            FormField::Reason => "Reason",
            FormField::Name => "Full Name",
            FormField::ContactEmail => "Contact Email",
            FormField::AdditionalDetails => "Additional Details",
        }
    }

    /// Whether the input surface must block submission while empty.
    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::AdditionalDetails)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised when addressing a field by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

impl FromStr for FormField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// Everything the guest has typed so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormDraft {
    pub booking_id: String,
    pub request_type: DraftRequestType,
    pub reason: DraftReason,
    pub name: String,
    pub contact_email: String,
    /// Optional free text.
    pub additional_details: String,
}

impl FormDraft {
    /// Overwrite one field from its raw input value.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::BookingId => self.booking_id = value,
            FormField::RequestType => self.request_type = DraftRequestType::from(value.as_str()),
            FormField::Reason => self.reason = DraftReason::from(value.as_str()),
            FormField::Name => self.name = value,
            FormField::ContactEmail => self.contact_email = value,
            FormField::AdditionalDetails => self.additional_details = value,
        }
    }

    /// Raw input value of one field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::BookingId => &self.booking_id,
            FormField::RequestType => self.request_type.as_str(),
            FormField::Reason => self.reason.as_str(),
            FormField::Name => &self.name,
            FormField::ContactEmail => &self.contact_email,
            FormField::AdditionalDetails => &self.additional_details,
        }
    }

    /// Required fields that are still blank, in form order.
    ///
    /// Used by input surfaces to enforce required fields before dispatching
    /// a submit; the controller itself does not re-check.
    pub fn missing_required_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = FormDraft::default();
        assert_eq!(draft.booking_id, "");
        assert_eq!(draft.request_type, DraftRequestType::Cancellation);
        assert_eq!(draft.reason, DraftReason::Unset);
        assert_eq!(draft.additional_details, "");
    }

    #[test]
    fn test_request_type_parsing() {
        assert_eq!(DraftRequestType::from("refund"), DraftRequestType::Refund);
        assert_eq!(
            DraftRequestType::from("modification"),
            DraftRequestType::Modification
        );
        assert_eq!(
            DraftRequestType::from("upgrade"),
            DraftRequestType::Unrecognized("upgrade".to_string())
        );
    }

    #[test]
    fn test_reason_parsing() {
        assert_eq!(DraftReason::from(""), DraftReason::Unset);
        assert_eq!(DraftReason::from("host_cancelled"), DraftReason::HostCancelled);
        assert_eq!(
            DraftReason::from("weather"),
            DraftReason::Unrecognized("weather".to_string())
        );
    }

    #[test]
    fn test_unrecognized_values_round_trip_raw_text() {
        let mut draft = FormDraft::default();
        draft.set(FormField::Reason, "legacy_reason");
        assert_eq!(draft.get(FormField::Reason), "legacy_reason");
    }

    #[test]
    fn test_set_and_get_each_field() {
        let mut draft = FormDraft::default();
        draft.set(FormField::BookingId, "BK1");
        draft.set(FormField::RequestType, "refund");
        draft.set(FormField::Reason, "emergency");
        draft.set(FormField::Name, "Ada");
        draft.set(FormField::ContactEmail, "ada@example.com");
        draft.set(FormField::AdditionalDetails, "Flight cancelled");

        assert_eq!(draft.get(FormField::BookingId), "BK1");
        assert_eq!(draft.request_type, DraftRequestType::Refund);
        assert_eq!(draft.reason, DraftReason::Emergency);
        assert_eq!(draft.get(FormField::Name), "Ada");
        assert_eq!(draft.get(FormField::ContactEmail), "ada@example.com");
        assert_eq!(draft.get(FormField::AdditionalDetails), "Flight cancelled");
    }

    #[test]
    fn test_field_from_name() {
        assert_eq!("bookingId".parse::<FormField>(), Ok(FormField::BookingId));
        assert_eq!(
            "contactEmail".parse::<FormField>(),
            Ok(FormField::ContactEmail)
        );
        assert_eq!(
            "perks".parse::<FormField>(),
            Err(FieldError::UnknownField("perks".to_string()))
        );
    }

    #[test]
    fn test_missing_required_fields() {
        let mut draft = FormDraft::default();
        assert_eq!(
            draft.missing_required_fields(),
            vec![
                FormField::BookingId,
                FormField::Reason,
                FormField::Name,
                FormField::ContactEmail
            ]
        );

        draft.set(FormField::BookingId, "BK1");
        draft.set(FormField::Reason, "other");
        draft.set(FormField::Name, "A");
        draft.set(FormField::ContactEmail, "a@b.com");
        assert!(draft.missing_required_fields().is_empty());
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut draft = FormDraft::default();
        draft.set(FormField::Name, "   ");
        assert!(draft.missing_required_fields().contains(&FormField::Name));
    }
}
