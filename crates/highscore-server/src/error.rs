use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use highscore_store::StoreError;
use highscore_types::TypeError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid topic: {0}")]
    InvalidTopic(#[from] TypeError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidTopic(_) => StatusCode::BAD_REQUEST,
            Self::Store(e) if e.is_rejected() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request refused");
        }
        (status, self.to_string()).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
