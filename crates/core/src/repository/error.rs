use thiserror::Error;

use crate::cache::{CacheError, SerializationError};
use crate::context::Interrupted;
use crate::storage::RepositoryError;

/// Errors surfaced by [`super::CacheAsideRepository`].
///
/// Reads only ever fail with `Store` or `Interrupted`; cache trouble on the
/// read path is logged and absorbed. `put` and `invalidate` surface `Cache`
/// and `Serialization` errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheAsideError {
    #[error(transparent)]
    Store(#[from] RepositoryError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Interrupted(#[from] Interrupted),
}

pub type Result<T> = std::result::Result<T, CacheAsideError>;
