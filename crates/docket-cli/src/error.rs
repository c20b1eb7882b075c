use anyhow::Error;
use docket_config::ConfigError;
use docket_core::CoreError;
use docket_store::error::StoreError;
use docket_submit::SubmitError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("form has {0} invalid field(s)")]
    InvalidForm(usize),
    #[error("submission failed: {0}")]
    SubmissionFailed(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn invalid_form(count: usize) -> Error {
    CliError::InvalidForm(count).into()
}

pub fn submission_failed(reason: impl Into<String>) -> Error {
    CliError::SubmissionFailed(reason.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

/// Process exit statuses other than success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Failure = 1,
    InvalidInput = 3,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// The first cause in the chain with a known classification decides;
/// anything unrecognised is a plain failure.
pub fn exit_for(err: &Error) -> Exit {
    err.chain().find_map(classify).unwrap_or(Exit::Failure)
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    exit_for(err).into()
}

fn classify(cause: &(dyn std::error::Error + 'static)) -> Option<Exit> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::InvalidInput(_) | CliError::InvalidForm(_) => Exit::InvalidInput,
            CliError::SubmissionFailed(_) => Exit::Failure,
        });
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(if err.is_caller_error() {
            Exit::InvalidInput
        } else {
            Exit::Failure
        });
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(match err {
            ConfigError::NoHomeDir => Exit::Failure,
            _ => Exit::InvalidInput,
        });
    }
    if let Some(err) = cause.downcast_ref::<SubmitError>() {
        return Some(match err {
            SubmitError::Core(_) | SubmitError::InFlight => Exit::InvalidInput,
            SubmitError::Runtime(_) => Exit::Failure,
        });
    }
    cause
        .downcast_ref::<CoreError>()
        .map(|_| Exit::InvalidInput)
}
