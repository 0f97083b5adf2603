use thiserror::Error;

use highscore_store::StoreError;
use highscore_types::TypeError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server refused request ({status}): {message}")]
    Refused { status: u16, message: String },

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid topic from server: {0}")]
    InvalidTopic(#[from] TypeError),

    #[error("background task failed: {0}")]
    Join(String),
}

impl ClientError {
    /// Whether the entry or topic was refused, as opposed to the request
    /// failing.
    pub fn is_refused(&self) -> bool {
        match self {
            Self::Refused { .. } => true,
            Self::Store(e) => e.is_rejected(),
            _ => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
