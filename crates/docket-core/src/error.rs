use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {0} is not a text field")]
    NotATextField(&'static str),
    #[error("form has invalid fields: {0}")]
    FormInvalid(String),
    #[error("invalid timestamp")]
    InvalidTimestamp,
}
