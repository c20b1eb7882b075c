use std::future::Future;
use std::time::Duration;

use docket_core::{SubmissionOutcome, SubmissionPayload};
use tracing::debug;

use crate::dispatcher::Submitter;

/// Stands in for a network call: waits, then accepts everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Submitter for SimulatedSubmitter {
    fn send(&self, payload: SubmissionPayload) -> impl Future<Output = SubmissionOutcome> + Send {
        let delay = self.delay;
        async move {
            debug!(delay_ms = delay.as_millis() as u64, "simulating submission latency");
            tokio::time::sleep(delay).await;
            SubmissionOutcome::Success { payload }
        }
    }
}
