//! Cart adapter errors.

use thiserror::Error;

use crate::http::ApiError;

/// Failures from the cart service adapter.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// Input rejected client-side before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The underlying HTTP call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
