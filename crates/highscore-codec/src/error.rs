use highscore_types::TypeError;
use thiserror::Error;

/// Reasons a line fails to decode, or a checksum secret is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("line too long: {len} bytes, max {max}")]
    LineTooLong { len: usize, max: usize },

    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("invalid {field} number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid field: {0}")]
    InvalidField(#[from] TypeError),

    #[error("checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: u64, computed: u64 },

    #[error("checksum secret {secret} must be odd")]
    WeakSecret { secret: u64 },
}

pub type CodecResult<T> = Result<T, CodecError>;
