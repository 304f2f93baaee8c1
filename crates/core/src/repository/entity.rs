use std::fmt::{Debug, Display};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::entity_key;
use crate::storage::Result;

/// An entity that can be snapshotted into the cache.
///
/// The identity is immutable once the entity exists and doubles as both the
/// store key and the cache key.
pub trait CacheableEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Display + Debug + Clone + Send + Sync + 'static;

    /// Prefix used in cache keys, e.g. `"product"`.
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> &Self::Id;

    fn cache_key(id: &Self::Id) -> String {
        entity_key(Self::ENTITY_TYPE, id)
    }
}

/// The authoritative by-id lookup for one entity type.
///
/// A missing entity is `RepositoryError::NotFound`, which the cache-aside
/// repository passes through untouched.
#[async_trait]
pub trait EntityStore<E: CacheableEntity>: Send + Sync {
    async fn get_by_id(&self, id: &E::Id) -> Result<E>;
}
