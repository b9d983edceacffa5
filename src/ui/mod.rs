//! User interface components and views.
//!
//! Rendering and key handling only; state lives in the form controller.

mod components;
pub mod theme;
mod views;

pub use components::{
    ChoicePicker, Notification, NotificationManager, NotificationType, ResultDialog, TextInput,
};
pub use views::{Focus, RefundFormAction, RefundFormView};
