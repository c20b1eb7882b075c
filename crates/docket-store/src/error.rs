use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("cannot locate a home directory for the default data path")]
    NoHomeDir,
    #[error("database schema version {found} is newer than this build supports ({known})")]
    SchemaTooNew { found: u32, known: u32 },
    #[error("invalid database path: {0}")]
    InvalidPath(PathBuf),
    #[error("storage key must not be blank")]
    BlankKey,
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Caused by what the caller passed in rather than by the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, StoreError::InvalidPath(_) | StoreError::BlankKey)
    }
}
