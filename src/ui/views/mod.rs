//! Application views.

mod refund_form;

pub use refund_form::{Focus, RefundFormAction, RefundFormView};
