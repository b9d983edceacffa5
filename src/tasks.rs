//! Background submission of refund requests.
//!
//! The event loop must keep rendering while a request is in flight, so the
//! HTTP call runs on a tokio task and reports back through a channel:
//! 1. The loop asks the controller to begin a submission and gets a payload
//! 2. `TaskSpawner::spawn_submit` sends it on a background task
//! 3. The loop polls the channel with `try_recv()` each tick
//! 4. The `ApiMessage` is handed to the controller to finish the submission

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{RefundRequest, Transport, REFUNDS_PATH};
use crate::form::SubmitOutcome;

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// The refund request finished, one way or the other.
    RefundSubmitted(SubmitOutcome),
}

/// Spawns background tasks for API calls.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    transport: Arc<dyn Transport>,
}

impl TaskSpawner {
    /// Create a spawner sending results through `tx`.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, transport: Arc<dyn Transport>) -> Self {
        Self { tx, transport }
    }

    /// Post a refund request on a background task.
    pub fn spawn_submit(&self, payload: RefundRequest) {
        let tx = self.tx.clone();
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let outcome = transport.submit(REFUNDS_PATH, &payload).await;
            if tx.send(ApiMessage::RefundSubmitted(outcome)).is_err() {
                debug!("Event loop gone, dropping refund outcome");
            }
        });
    }
}
