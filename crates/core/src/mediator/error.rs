use thiserror::Error;

use crate::cache::CacheError;
use crate::context::Interrupted;
use crate::repository::CacheAsideError;
use crate::storage::RepositoryError;

use super::ValidationErrors;

/// Every way a [`super::Mediator::send`] call can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No handler is registered for the request type. Configuration bug.
    #[error("No handler registered for {request}")]
    HandlerNotFound { request: &'static str },
    /// A second handler was registered for the same request type.
    #[error("A handler is already registered for {request}")]
    DuplicateHandler { request: &'static str },
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// Failure reported by the authoritative store, passed through verbatim.
    #[error(transparent)]
    Store(#[from] RepositoryError),
    /// Failure writing to the cache on a write path.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// A domain rule rejected an otherwise well-formed request.
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Request canceled")]
    Canceled,
    #[error("Deadline exceeded")]
    DeadlineExceeded,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Configuration errors are never retried and should abort startup.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DispatchError::HandlerNotFound { .. } | DispatchError::DuplicateHandler { .. }
        )
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, DispatchError::Canceled | DispatchError::DeadlineExceeded)
    }
}

impl From<Interrupted> for DispatchError {
    fn from(err: Interrupted) -> Self {
        match err {
            Interrupted::Canceled => DispatchError::Canceled,
            Interrupted::DeadlineExceeded => DispatchError::DeadlineExceeded,
        }
    }
}

impl From<CacheAsideError> for DispatchError {
    fn from(err: CacheAsideError) -> Self {
        match err {
            CacheAsideError::Store(err) => DispatchError::Store(err),
            CacheAsideError::Cache(err) => DispatchError::Cache(err),
            CacheAsideError::Serialization(err) => {
                DispatchError::Cache(CacheError::Serialization(err.to_string()))
            }
            CacheAsideError::Interrupted(err) => err.into(),
        }
    }
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
