use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("malformed record: {0}")]
    MalformedRecord(String),
}
