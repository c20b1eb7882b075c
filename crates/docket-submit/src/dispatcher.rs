use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use docket_core::time::now_utc;
use docket_core::{FormValidationOutcome, FormValues, SubmissionOutcome, SubmissionPayload};
use tracing::{info, warn};

use crate::error::{Result, SubmitError};

/// Transport seam. A real implementation reports transport errors as
/// [`SubmissionOutcome::Failure`].
pub trait Submitter {
    fn send(&self, payload: SubmissionPayload) -> impl Future<Output = SubmissionOutcome> + Send;
}

/// Runs at most one submission at a time.
#[derive(Debug)]
pub struct Dispatcher<S> {
    submitter: S,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmitError::InFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl<S: Submitter> Dispatcher<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            submitter,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Hosts render the submit trigger disabled while this is set.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Captures the payload at call time, then waits on the submitter.
    /// Rejects an invalid outcome and any call made while another
    /// submission is pending. The flag clears when the returned future
    /// completes or is dropped.
    pub async fn submit(
        &self,
        outcome: &FormValidationOutcome,
        values: &FormValues,
    ) -> Result<SubmissionOutcome> {
        let payload = SubmissionPayload::capture(outcome, values, now_utc())?;
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let result = self.submitter.send(payload).await;
        match &result {
            SubmissionOutcome::Success { payload } => log_accepted(payload),
            SubmissionOutcome::Failure { reason } => {
                warn!(%reason, "submission failed");
            }
        }
        Ok(result)
    }
}

fn log_accepted(payload: &SubmissionPayload) {
    match serde_json::to_string(payload) {
        Ok(data) => info!(id = %payload.id(), form = %data, "submission accepted"),
        Err(err) => warn!(id = %payload.id(), error = %err, "submission accepted; form not logged"),
    }
}
