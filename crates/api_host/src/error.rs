//! Error taxonomy for API service calls.

use thiserror::Error;

/// Failure of an API service call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (network down, CORS,
    /// aborted connection).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server responded {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided error message, or the status text when the body
        /// carried none.
        message: String,
    },

    /// A 2xx response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns the HTTP status code for [`ApiError::Status`] failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
