//! Gateway error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrikError {
    /// The gateway could not be reached at all.
    #[error("cannot reach gateway: {0}")]
    Connectivity(String),

    /// The gateway answered, but not in the shape we expect.
    #[error("gateway protocol error: {0}")]
    Protocol(String),

    /// The gateway answered 404 for a tool or content reference.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for TrikError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            TrikError::Connectivity(err.to_string())
        } else if err.is_decode() {
            TrikError::Protocol(err.to_string())
        } else {
            TrikError::Connectivity(err.to_string())
        }
    }
}
