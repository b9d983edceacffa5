//! refund-form - submit booking refund and cancellation requests from the
//! terminal.
//!
//! The [`form`] module holds the draft, the request mapping and the
//! submission lifecycle; [`api`] posts requests to the refunds endpoint; the
//! rest is the terminal front end around them.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod form;
pub mod logging;
pub mod tasks;
pub mod ui;
