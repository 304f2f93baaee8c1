use super::RepositoryError;

/// HTTP status for a store failure.
///
/// Missing rows are 404 and id collisions 409. An unreachable backend is
/// 503 so callers may retry. Rejected input is 400; anything else the
/// store could not do is 500.
///
/// ```
/// use storefront_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::not_found("product", "prod-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    use RepositoryError::*;

    match error {
        NotFound { .. } => 404,
        AlreadyExists { .. } => 409,
        ConnectionFailed(_) => 503,
        InvalidData(_) => 400,
        QueryFailed(_) | Serialization(_) => 500,
    }
}
