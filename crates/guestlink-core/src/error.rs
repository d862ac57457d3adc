use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("group separators cannot be empty strings")]
    EmptySeparator,
    #[error("invalid group separators: {0}")]
    InvalidSeparators(String),
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),
}
