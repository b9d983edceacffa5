//! Terminal event handling.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// Events the main loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
