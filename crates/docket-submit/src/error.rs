use docket_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, SubmitError>;
