//! Pure functions for mapping dispatch errors to HTTP status codes.
//!
//! Adapters use this to give every failure kind a stable external status.

use crate::storage::repository_error_to_status_code;

use super::DispatchError;

/// Maps a [`DispatchError`] to an HTTP status code.
///
/// - `HandlerNotFound` / `DuplicateHandler` -> 500 (configuration bug)
/// - `Validation` -> 400 (Bad Request)
/// - `Store` -> see [`repository_error_to_status_code`]
/// - `Cache` -> 503 (Service Unavailable)
/// - `Rejected` -> 422 (Unprocessable Entity)
/// - `Canceled` -> 499 (Client Closed Request)
/// - `DeadlineExceeded` -> 504 (Gateway Timeout)
/// - `Internal` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use storefront_core::mediator::{dispatch_error_to_status_code, DispatchError};
///
/// assert_eq!(dispatch_error_to_status_code(&DispatchError::DeadlineExceeded), 504);
/// ```
pub fn dispatch_error_to_status_code(error: &DispatchError) -> u16 {
    match error {
        DispatchError::HandlerNotFound { .. } => 500,
        DispatchError::DuplicateHandler { .. } => 500,
        DispatchError::Validation(_) => 400,
        DispatchError::Store(err) => repository_error_to_status_code(err),
        DispatchError::Cache(_) => 503,
        DispatchError::Rejected(_) => 422,
        DispatchError::Canceled => 499,
        DispatchError::DeadlineExceeded => 504,
        DispatchError::Internal(_) => 500,
    }
}
