use highscore_codec::CodecError;

/// Errors from topic store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The submitted entry failed to decode or verify.
    #[error("entry rejected: {0}")]
    Rejected(#[from] CodecError),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the caller sent bad input (as opposed to a storage failure).
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
