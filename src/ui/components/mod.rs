//! Reusable UI components.

mod choice;
mod dialog;
mod input;
mod notification;

pub use choice::ChoicePicker;
pub use dialog::ResultDialog;
pub use input::TextInput;
pub use notification::{Notification, NotificationManager, NotificationType};
