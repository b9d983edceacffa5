//! The seam between the form controller and the network.

use async_trait::async_trait;

use super::error::Result;
use super::types::{RefundRequest, RefundResponse};

/// Path the refund request is posted to, relative to the API base URL.
pub const REFUNDS_PATH: &str = "/refunds";

/// Sends refund requests somewhere.
///
/// `Ok` means the server answered with a 2xx status; whether it accepted the
/// request is in [`RefundResponse::success`]. Everything else is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, path: &str, payload: &RefundRequest) -> Result<RefundResponse>;
}
