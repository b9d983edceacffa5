//! Refunds API client and types.
//!
//! This module provides the transport the form controller submits through
//! and the JSON types of the refunds endpoint.

mod auth;
mod client;
pub mod error;
mod transport;
pub mod types;

pub use auth::{delete_token, store_token, Auth};
pub use client::RefundClient;
pub use error::ApiError;
pub use transport::{Transport, REFUNDS_PATH};
pub use types::{RefundReason, RefundRequest, RefundRequestType, RefundResponse};
