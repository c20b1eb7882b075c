use std::sync::Arc;

use anyhow::Result;
use docket_core::drafts;
use docket_core::notices::{self, NoticeKind};
use docket_core::{FormValidationOutcome, FormValues, SubmissionOutcome};
use docket_store::Store;
use docket_submit::{Dispatcher, SimulatedSubmitter, SubmitError};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::app::{App, Slot};
use crate::util::format_local_time;

#[derive(Debug, Clone)]
pub enum Action {
    LoadSession,
    SaveDraft(Slot, String),
    ClearDrafts,
    AcceptNotice(NoticeKind),
    Submit(Box<FormValidationOutcome>, FormValues),
}

type PendingSubmission = JoinHandle<docket_submit::Result<SubmissionOutcome>>;

/// Everything actions run against: the store plus the submission task.
pub struct Session<'a> {
    store: &'a Store,
    runtime: &'a Runtime,
    dispatcher: Arc<Dispatcher<SimulatedSubmitter>>,
    pending: Option<PendingSubmission>,
}

impl<'a> Session<'a> {
    pub fn new(
        store: &'a Store,
        runtime: &'a Runtime,
        dispatcher: Dispatcher<SimulatedSubmitter>,
    ) -> Self {
        Self {
            store,
            runtime,
            dispatcher: Arc::new(dispatcher),
            pending: None,
        }
    }

    pub fn execute(&mut self, app: &mut App, action: Action) -> Result<()> {
        let storage = self.store.local_storage();
        match action {
            Action::LoadSession => {
                let restored = if app.settings.autosave {
                    Some(drafts::load_drafts(&storage)?)
                } else {
                    None
                };
                let disclaimer_pending = app.settings.disclaimer
                    && !notices::is_accepted(&storage, NoticeKind::Disclaimer)?;
                let cookies_pending = app.settings.cookies
                    && !notices::is_accepted(&storage, NoticeKind::Cookies)?;
                app.apply_session(restored, disclaimer_pending, cookies_pending);
            }
            Action::SaveDraft(slot, value) => match slot {
                Slot::Field(field) => drafts::save_draft(&storage, field, &value)?,
                Slot::PracticeArea => drafts::save_practice_area_draft(&storage, &value)?,
                Slot::Send | Slot::Reset => {}
            },
            Action::ClearDrafts => {
                drafts::clear_drafts(&storage)?;
            }
            Action::AcceptNotice(kind) => {
                notices::accept(&storage, kind)?;
                app.set_status(format!("Accepted {}", kind.as_str()));
            }
            Action::Submit(outcome, values) => {
                if let Err(err) = self.start_submission(*outcome, values) {
                    app.submission_error(err.to_string());
                }
            }
        }
        Ok(())
    }

    fn start_submission(
        &mut self,
        outcome: FormValidationOutcome,
        values: FormValues,
    ) -> Result<(), SubmitError> {
        if self.pending.is_some() || self.dispatcher.is_in_flight() {
            return Err(SubmitError::InFlight);
        }
        let dispatcher = Arc::clone(&self.dispatcher);
        self.pending = Some(
            self.runtime
                .spawn(async move { dispatcher.submit(&outcome, &values).await }),
        );
        Ok(())
    }

    /// Hands a finished submission back to the app; a no-op while it is pending.
    pub fn poll_submission(&mut self, app: &mut App) {
        let finished = self
            .pending
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };
        match self.runtime.block_on(handle) {
            Ok(Ok(outcome)) => {
                if let Some(payload) = outcome.payload() {
                    app.set_status(format!("Sent {}", format_local_time(payload.timestamp())));
                }
                app.apply_submission(outcome);
            }
            Ok(Err(err)) => app.submission_error(err.to_string()),
            Err(err) => app.submission_error(format!("submission task failed: {err}")),
        }
    }
}
