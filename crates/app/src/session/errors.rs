//! Session errors.

use thiserror::Error;

use crate::http::ApiError;

/// Auth adapter and session persistence failures.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Input rejected client-side before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The underlying HTTP call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session file could not be written.
    #[error("failed to persist the session")]
    Store(#[source] std::io::Error),
}
