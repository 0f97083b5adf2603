use thiserror::Error;

/// Errors produced when constructing foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} too long: {len} bytes, max {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{field} contains forbidden character: {ch:?}")]
    ForbiddenChar { field: &'static str, ch: char },

    #[error("{field} must not end with a space")]
    TrailingSpace { field: &'static str },

    #[error("invalid topic {topic:?}: {reason}")]
    InvalidTopic { topic: String, reason: String },
}
