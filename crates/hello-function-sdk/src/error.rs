//! Error types for the worker protocol

use thiserror::Error;

/// Errors raised while exchanging requests and responses with a host.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Convert to a plain-text Response
    pub fn to_response(&self) -> crate::Response {
        crate::Response::text(self.status_code(), self.to_string())
    }
}

impl From<HandlerError> for crate::Response {
    fn from(err: HandlerError) -> Self {
        err.to_response()
    }
}
